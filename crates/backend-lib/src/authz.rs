// ============================
// crates/backend-lib/src/authz.rs
// ============================
//! Ownership checks for task and profile access.
//!
//! The order of checks for any resource-scoped operation is fixed:
//! authenticate, locate the resource, then compare owners. An absent
//! resource reports `NotFound`; a present resource owned by someone
//! else reports `Forbidden`. Existence is not hidden from an
//! authenticated principal, but content is.
use taskboard_common::TaskRecord;

use crate::auth::Principal;
use crate::error::AppError;
use crate::storage::Storage;

/// Allow iff the principal owns the resource.
pub fn authorize(principal: &Principal, resource_owner_id: &str) -> Result<(), AppError> {
    if principal.user_id.trim() == resource_owner_id.trim() {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %principal.user_id,
            owner_id = %resource_owner_id,
            "ownership check failed"
        );
        Err(AppError::Forbidden)
    }
}

/// Locate a task and verify the principal owns it.
pub async fn load_owned_task<S: Storage>(
    storage: &S,
    principal: &Principal,
    task_id: &str,
) -> Result<TaskRecord, AppError> {
    let task = storage
        .find_task_by_id(task_id)
        .await?
        .ok_or(AppError::NotFound("Task"))?;
    authorize(principal, &task.user_id)?;
    Ok(task)
}
