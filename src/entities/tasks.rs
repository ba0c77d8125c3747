use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// UUID v4, generated at creation and immutable afterwards.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub description: String,

    /// Immutable owner reference. Never rewritten by updates.
    pub owner_username: String,

    /// Optional scheduled time (RFC3339)
    pub scheduled_at: Option<String>,

    pub duration_hours: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerUsername",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
