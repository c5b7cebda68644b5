// ============================
// crates/backend-lib/src/handlers/tasks.rs
// ============================
//! Task CRUD handlers. Every resource-scoped operation goes through
//! `authz::load_owned_task`, so an absent task reports 404 and a task
//! owned by someone else reports 403, in that order.
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use taskboard_common::{CreateTaskRequest, TaskRecord, TaskStatus, UpdateTaskRequest};
use uuid::Uuid;

use crate::auth::Principal;
use crate::authz;
use crate::error::AppError;
use crate::storage::Storage;
use crate::validation::FieldError;
use crate::AppState;

/// `GET /api/tasks`
pub async fn list<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = state.storage.tasks_for_user(&principal.user_id).await?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// `POST /api/tasks`
pub async fn create<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "title",
            message: "Title is required".to_string(),
        }]));
    }

    let now = Utc::now();
    let task = TaskRecord {
        id: Uuid::new_v4().to_string(),
        user_id: principal.user_id.clone(),
        title: title.to_string(),
        description: payload.description.unwrap_or_default(),
        status: TaskStatus::Pending,
        deadline: payload.deadline,
        created_at: now,
        updated_at: now,
    };
    state.storage.insert_task(&task).await?;
    tracing::debug!(task_id = %task.id, user_id = %principal.user_id, "created task");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "task": task })),
    ))
}

/// `GET /api/tasks/{id}`
pub async fn get_task<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let task = authz::load_owned_task(&state.storage, &principal, &id).await?;
    Ok(Json(json!({ "task": task })))
}

/// `PATCH /api/tasks/{id}`
pub async fn update<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut task = authz::load_owned_task(&state.storage, &principal, &id).await?;

    if let Some(title) = payload.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation(vec![FieldError {
                field: "title",
                message: "Title is required".to_string(),
            }]));
        }
        task.title = title;
    }
    if let Some(description) = payload.description {
        task.description = description;
    }
    if let Some(status) = payload.status {
        task.status = status;
    }
    if let Some(deadline) = payload.deadline {
        task.deadline = Some(deadline);
    }
    task.updated_at = Utc::now();

    state.storage.update_task(&task).await?;
    Ok(Json(json!({ "task": task })))
}

/// `DELETE /api/tasks/{id}`
pub async fn remove<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let task = authz::load_owned_task(&state.storage, &principal, &id).await?;
    state.storage.delete_task(&task.id).await?;
    tracing::debug!(task_id = %task.id, user_id = %principal.user_id, "deleted task");
    Ok(Json(json!({ "success": true })))
}
