// ============================
// crates/backend-lib/src/handlers/profile.rs
// ============================
//! Profile read and update.
use axum::{extract::State, response::IntoResponse, Extension, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use taskboard_common::{UpdateProfileRequest, UserView};

use crate::auth::Principal;
use crate::authz;
use crate::error::AppError;
use crate::storage::Storage;
use crate::validation::{is_valid_email, is_valid_full_name, FieldError, MIN_NAME_LENGTH};
use crate::AppState;

/// `GET /api/profile`
pub async fn get_profile<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .storage
        .find_user_by_id(&principal.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(json!({ "user": UserView::profile(&user) })))
}

/// `PATCH /api/profile`
///
/// Updates the caller's own record; a changed email must not collide
/// with another account.
pub async fn update_profile<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state
        .storage
        .find_user_by_id(&principal.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    authz::authorize(&principal, &user.id)?;

    let mut errors = Vec::new();
    if let Some(full_name) = &payload.full_name {
        if !is_valid_full_name(full_name) {
            errors.push(FieldError {
                field: "fullName",
                message: format!("Full name must be at least {MIN_NAME_LENGTH} characters"),
            });
        }
    }
    if let Some(email) = &payload.email {
        if !is_valid_email(email.trim()) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email".to_string(),
            });
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if let Some(email) = payload.email {
        let email = email.trim().to_lowercase();
        if email != user.email {
            if let Some(existing) = state.storage.find_user_by_email(&email).await? {
                if existing.id != user.id {
                    return Err(AppError::EmailTaken);
                }
            }
            user.email = email;
        }
    }
    if let Some(full_name) = payload.full_name {
        user.full_name = full_name.trim().to_string();
    }
    user.updated_at = Utc::now();

    state.storage.update_user(&user).await?;
    Ok(Json(json!({ "user": UserView::profile(&user) })))
}
