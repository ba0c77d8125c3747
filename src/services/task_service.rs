//! Domain service for authorization-aware task CRUD.
//!
//! This is the one component with real decision logic: ownership checks,
//! admin escalation, and the existence-versus-permission error distinction.
//! Everything else (credential checks, routing, payload validation) happens
//! in collaborators before or after these calls.

use crate::api::types::{PageDto, PageQuery, TaskDto, TaskRequest};
use crate::domain::TaskId;
use thiserror::Error;

/// Domain errors for task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// Authenticated but not the owner and not an administrator.
    #[error("Not authorized to access this task")]
    Forbidden,

    /// The acting username could not be resolved even though authentication
    /// already succeeded upstream. An identity-store inconsistency (for
    /// example a deleted user with a live session), surfaced as a server
    /// fault rather than masked.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for task operations.
///
/// Every operation takes the acting username as resolved by the
/// authentication layer; the service trusts that value completely and never
/// checks credentials itself. Payloads reaching these methods have already
/// passed field validation.
#[async_trait::async_trait]
pub trait TaskService: Send + Sync {
    /// Creates a task owned by the acting user with a freshly generated id.
    ///
    /// Ownership is fixed to the actor; the payload carries no owner field.
    /// No authorization check is needed here.
    ///
    /// # Errors
    ///
    /// - Returns [`TaskError::UserNotFound`] if the acting username does not
    ///   resolve to a known user
    /// - Returns [`TaskError::Database`] on store failures
    async fn create_task(
        &self,
        acting_username: &str,
        request: &TaskRequest,
    ) -> Result<TaskDto, TaskError>;

    /// Loads a task by id after checking the access policy against its owner.
    ///
    /// # Errors
    ///
    /// - Returns [`TaskError::NotFound`] if the id is absent
    /// - Returns [`TaskError::Forbidden`] if the actor is neither the owner
    ///   nor an administrator
    async fn get_task(&self, id: TaskId, acting_username: &str) -> Result<TaskDto, TaskError>;

    /// Replaces name, description, scheduled time, and duration in place.
    /// The owner reference is never touched.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`TaskService::get_task`]; a delete racing this
    /// update surfaces as [`TaskError::NotFound`].
    async fn update_task(
        &self,
        id: TaskId,
        acting_username: &str,
        request: &TaskRequest,
    ) -> Result<TaskDto, TaskError>;

    /// Removes a task permanently. Deleting an already-absent id reports
    /// [`TaskError::NotFound`] rather than succeeding silently.
    async fn delete_task(&self, id: TaskId, acting_username: &str) -> Result<(), TaskError>;

    /// Lists tasks owned by the acting user, paginated with stable ordering.
    ///
    /// List scope is always self: administrators do not see other users'
    /// tasks here, unlike the by-id operations.
    async fn list_tasks(
        &self,
        acting_username: &str,
        page: PageQuery,
    ) -> Result<PageDto<TaskDto>, TaskError>;
}
