use serde::{Deserialize, Serialize};

use crate::entities::tasks;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Itemized field-level violations for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: None,
        }
    }

    pub fn validation_errors(message: impl Into<String>, violations: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: Some(violations),
        }
    }
}

/// Externally exposed projection of a task. Carries the owner's username
/// only, never the owning user record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_username: String,
    pub scheduled_date_time: Option<String>,
    pub duration_in_hour: i32,
}

impl From<tasks::Model> for TaskDto {
    fn from(model: tasks::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            owner_username: model.owner_username,
            scheduled_date_time: model.scheduled_at,
            duration_in_hour: model.duration_hours,
        }
    }
}

/// Create/update payload. Carries no owner field: ownership is fixed to the
/// acting user at creation and never taken from input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scheduled_date_time: Option<String>,
    #[serde(default)]
    pub duration_in_hour: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

const fn default_page_size() -> u64 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}
