use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::tasks;

/// Writable task fields. The owner reference is deliberately absent: it is
/// fixed at insert time and never rewritten.
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub scheduled_at: Option<String>,
    pub duration_hours: i32,
}

/// One page of tasks for a single owner.
#[derive(Debug, Clone)]
pub struct TaskPage {
    pub items: Vec<tasks::Model>,
    pub total_items: u64,
    pub total_pages: u64,
}

pub struct TaskRepository {
    conn: DatabaseConnection,
}

impl TaskRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new task owned by `owner_username` under the given id.
    pub async fn insert(
        &self,
        id: &str,
        owner_username: &str,
        fields: &TaskFields,
    ) -> Result<tasks::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = tasks::ActiveModel {
            id: Set(id.to_string()),
            name: Set(fields.name.clone()),
            description: Set(fields.description.clone()),
            owner_username: Set(owner_username.to_string()),
            scheduled_at: Set(fields.scheduled_at.clone()),
            duration_hours: Set(fields.duration_hours),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let task = active
            .insert(&self.conn)
            .await
            .context("Failed to insert task")?;

        Ok(task)
    }

    /// Get a task by id.
    pub async fn get(&self, id: &str) -> Result<Option<tasks::Model>> {
        let task = tasks::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query task by id")?;

        Ok(task)
    }

    /// Replace the writable fields of a task in place within one transaction,
    /// so the update fully precedes or follows a racing delete.
    ///
    /// Returns `None` if the task no longer exists.
    pub async fn update_fields(
        &self,
        id: &str,
        fields: &TaskFields,
    ) -> Result<Option<tasks::Model>> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to start task update transaction")?;

        let Some(task) = tasks::Entity::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to load task for update")?
        else {
            txn.rollback().await.ok();
            return Ok(None);
        };

        let mut active: tasks::ActiveModel = task.into();
        active.name = Set(fields.name.clone());
        active.description = Set(fields.description.clone());
        active.scheduled_at = Set(fields.scheduled_at.clone());
        active.duration_hours = Set(fields.duration_hours);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&txn)
            .await
            .context("Failed to update task")?;

        txn.commit()
            .await
            .context("Failed to commit task update")?;

        Ok(Some(updated))
    }

    /// Remove a task permanently. Returns `false` when the id was already
    /// absent so callers can keep their error taxonomy accurate.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let result = tasks::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete task")?;

        Ok(result.rows_affected > 0)
    }

    /// List tasks owned by `owner_username`, ordered stably by creation time
    /// then id so sequential page fetches neither duplicate nor skip items.
    pub async fn list_by_owner(
        &self,
        owner_username: &str,
        page: u64,
        page_size: u64,
    ) -> Result<TaskPage> {
        let paginator = tasks::Entity::find()
            .filter(tasks::Column::OwnerUsername.eq(owner_username))
            .order_by_asc(tasks::Column::CreatedAt)
            .order_by_asc(tasks::Column::Id)
            .paginate(&self.conn, page_size.max(1));

        let totals = paginator
            .num_items_and_pages()
            .await
            .context("Failed to count tasks for owner")?;

        let items = paginator
            .fetch_page(page)
            .await
            .context("Failed to fetch task page")?;

        Ok(TaskPage {
            items,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }
}
