use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::types::{ApiResponse, PageDto, PageQuery, TaskDto, TaskRequest};
use super::{ApiError, AppState, validation};

/// POST /tasks
/// Create a task owned by the authenticated user
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Json(payload): Json<TaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskDto>>), ApiError> {
    validation::validate_task_request(&payload)?;

    let task = state.task_service().create_task(&username, &payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TaskDto>>, ApiError> {
    let task_id = validation::validate_task_id(&id)?;

    let task = state.task_service().get_task(task_id, &username).await?;

    Ok(Json(ApiResponse::success(task)))
}

/// PUT /tasks/{id}
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TaskRequest>,
) -> Result<Json<ApiResponse<TaskDto>>, ApiError> {
    let task_id = validation::validate_task_id(&id)?;
    validation::validate_task_request(&payload)?;

    let task = state
        .task_service()
        .update_task(task_id, &username, &payload)
        .await?;

    Ok(Json(ApiResponse::success(task)))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task_id = validation::validate_task_id(&id)?;

    state.task_service().delete_task(task_id, &username).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tasks
/// List the authenticated user's own tasks, paginated
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageDto<TaskDto>>>, ApiError> {
    validation::validate_page_size(page.page_size)?;

    let tasks = state.task_service().list_tasks(&username, page).await?;

    Ok(Json(ApiResponse::success(tasks)))
}
