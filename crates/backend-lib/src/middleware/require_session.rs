// ============================
// crates/backend-lib/src/middleware/require_session.rs
// ============================
//! Request gate: runs ahead of every route and classifies each request
//! as public, rejected, or authenticated. Any path not on the
//! allow-list is protected, so new routes are covered by default.
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::auth::{parse_cookie, Principal, SESSION_COOKIE};
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// Paths reachable without a session: the landing page, the login and
/// registration pages, and their submission endpoints. Logout is also
/// listed so that it stays idempotent for clients whose session has
/// already expired.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/logout",
];

/// Session-gate middleware.
///
/// On a protected path the session cookie is extracted and verified;
/// a valid token attaches a [`Principal`] to the request for the
/// downstream handler. Invalid or missing tokens short-circuit: API
/// paths get a 401 with a generic message, page paths are redirected
/// to the login page.
pub async fn require_session<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    if PUBLIC_PATHS.contains(&path.as_str()) {
        return Ok(next.run(request).await);
    }

    let subject = parse_cookie(request.headers(), SESSION_COOKIE)
        .and_then(|token| state.sessions.verify(&token));

    match subject {
        Some(user_id) => {
            request.extensions_mut().insert(Principal { user_id });
            Ok(next.run(request).await)
        },
        None => {
            tracing::debug!(%path, "rejected request without valid session");
            if path.starts_with("/api/") {
                Err(AppError::Unauthorized)
            } else {
                Ok(Redirect::to("/login").into_response())
            }
        },
    }
}
