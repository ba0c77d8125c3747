use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Default API keys (regenerate after first login)
const DEFAULT_ADMIN_API_KEY: &str = "taskarr_admin_api_key_please_regenerate";
const DEFAULT_READER_API_KEY: &str = "taskarr_reader_api_key_please_regenerate";

/// Hash a bootstrap password using Argon2id
fn hash_bootstrap_password(password: &[u8]) -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash bootstrap password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Tasks)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed bootstrap accounts: one administrator and one regular user
        let now = chrono::Utc::now().to_rfc3339();

        for (username, password, role, api_key) in [
            ("admin", b"admin123".as_slice(), "ADMIN", DEFAULT_ADMIN_API_KEY),
            ("reader", b"reader123".as_slice(), "READER", DEFAULT_READER_API_KEY),
        ] {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Users)
                .columns([
                    crate::entities::users::Column::Username,
                    crate::entities::users::Column::PasswordHash,
                    crate::entities::users::Column::Role,
                    crate::entities::users::Column::ApiKey,
                    crate::entities::users::Column::CreatedAt,
                    crate::entities::users::Column::UpdatedAt,
                ])
                .values_panic([
                    username.into(),
                    hash_bootstrap_password(password).into(),
                    role.into(),
                    api_key.into(),
                    now.clone().into(),
                    now.clone().into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
