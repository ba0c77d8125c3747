//! `SeaORM` implementation of the `TaskService` trait.

use crate::api::types::{PageDto, PageQuery, TaskDto, TaskRequest};
use crate::db::{Store, TaskFields, User};
use crate::domain::{self, TaskId};
use crate::entities::tasks;
use crate::services::task_service::{TaskError, TaskService};
use async_trait::async_trait;

pub struct SeaOrmTaskService {
    store: Store,
}

impl SeaOrmTaskService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolves the acting user. The username came from a verified session,
    /// so a miss here is an integrity fault, not a client error.
    async fn resolve_actor(&self, username: &str) -> Result<User, TaskError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| TaskError::UserNotFound(username.to_string()))
    }

    /// Loads the task and applies the access policy against its owner.
    async fn load_authorized(
        &self,
        id: TaskId,
        acting_username: &str,
    ) -> Result<tasks::Model, TaskError> {
        let task = self
            .store
            .get_task(&id.to_string())
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let actor = self.resolve_actor(acting_username).await?;

        if !domain::can_access(actor.role, &actor.username, &task.owner_username) {
            return Err(TaskError::Forbidden);
        }

        Ok(task)
    }
}

fn request_to_fields(request: &TaskRequest) -> TaskFields {
    TaskFields {
        name: request.name.clone(),
        description: request.description.clone(),
        scheduled_at: request.scheduled_date_time.clone(),
        duration_hours: request.duration_in_hour,
    }
}

#[async_trait]
impl TaskService for SeaOrmTaskService {
    async fn create_task(
        &self,
        acting_username: &str,
        request: &TaskRequest,
    ) -> Result<TaskDto, TaskError> {
        let actor = self.resolve_actor(acting_username).await?;

        let id = TaskId::generate();
        let task = self
            .store
            .insert_task(&id.to_string(), &actor.username, &request_to_fields(request))
            .await?;

        tracing::debug!("Task {} created for user {}", task.id, actor.username);

        Ok(TaskDto::from(task))
    }

    async fn get_task(&self, id: TaskId, acting_username: &str) -> Result<TaskDto, TaskError> {
        let task = self.load_authorized(id, acting_username).await?;
        Ok(TaskDto::from(task))
    }

    async fn update_task(
        &self,
        id: TaskId,
        acting_username: &str,
        request: &TaskRequest,
    ) -> Result<TaskDto, TaskError> {
        self.load_authorized(id, acting_username).await?;

        // The repository re-loads inside a transaction; a delete that slipped
        // in between the authorization check and this call reports NotFound.
        let updated = self
            .store
            .update_task_fields(&id.to_string(), &request_to_fields(request))
            .await?
            .ok_or(TaskError::NotFound(id))?;

        Ok(TaskDto::from(updated))
    }

    async fn delete_task(&self, id: TaskId, acting_username: &str) -> Result<(), TaskError> {
        self.load_authorized(id, acting_username).await?;

        let removed = self.store.remove_task(&id.to_string()).await?;
        if !removed {
            return Err(TaskError::NotFound(id));
        }

        tracing::debug!("Task {} deleted by user {}", id, acting_username);

        Ok(())
    }

    async fn list_tasks(
        &self,
        acting_username: &str,
        page: PageQuery,
    ) -> Result<PageDto<TaskDto>, TaskError> {
        // Scope is always the actor's own tasks, including for admins.
        let task_page = self
            .store
            .list_tasks_for_owner(acting_username, page.page, page.page_size)
            .await?;

        Ok(PageDto {
            items: task_page.items.into_iter().map(TaskDto::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total_items: task_page.total_items,
            total_pages: task_page.total_pages,
        })
    }
}
