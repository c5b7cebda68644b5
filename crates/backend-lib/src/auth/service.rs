// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! Login and registration orchestration.
//!
//! Both operations validate input before touching storage, so a
//! rejected request never leaves a partial write behind.
use chrono::Utc;
use taskboard_common::{LoginRequest, RegisterRequest, UserRecord, UserView};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::storage::Storage;
use crate::validation::{validate_login, validate_register};

/// Register a new account. Fails with `Validation` listing every
/// violated field, or `EmailTaken` when the address is already in use.
pub async fn register<S: Storage>(storage: &S, req: RegisterRequest) -> Result<UserView, AppError> {
    let errors = validate_register(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let email = req.email.trim().to_lowercase();
    if storage.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }

    let password_hash =
        hash_password(&req.password).map_err(|e| AppError::Internal(e.to_string()))?;
    let now = Utc::now();
    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        full_name: req.full_name.trim().to_string(),
        email,
        password_hash,
        created_at: now,
        updated_at: now,
    };
    storage.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, "registered new user");

    Ok(UserView::from_record(&user))
}

/// Authenticate an email/password pair.
///
/// An unknown email and a wrong password both fail with
/// `InvalidCredentials`; the outcomes are indistinguishable on purpose.
pub async fn login<S: Storage>(storage: &S, req: LoginRequest) -> Result<UserView, AppError> {
    let errors = validate_login(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let email = req.email.trim().to_lowercase();
    let user = storage
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&user.password_hash, &req.password) {
        tracing::debug!(user_id = %user.id, "password verification failed");
        return Err(AppError::InvalidCredentials);
    }

    Ok(UserView::from_record(&user))
}
