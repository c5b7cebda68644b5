// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::handlers::{auth, profile, tasks};
use crate::middleware::require_session;
use crate::storage::Storage;
use crate::AppState;

/// Create the application router. The session gate is layered over
/// every route, including the fallback, so unlisted paths are
/// protected by default.
pub fn create_router<S: Storage + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/auth/register", post(auth::register::<S>))
        .route("/api/auth/login", post(auth::login::<S>))
        .route("/api/auth/logout", post(auth::logout::<S>))
        .route("/api/auth/me", get(auth::me::<S>))
        .route("/api/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task::<S>)
                .patch(tasks::update::<S>)
                .delete(tasks::remove::<S>),
        )
        .route(
            "/api/profile",
            get(profile::get_profile::<S>).patch(profile::update_profile::<S>),
        )
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public landing endpoint
async fn index() -> impl IntoResponse {
    Json(json!({ "service": "taskboard", "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource")
}
