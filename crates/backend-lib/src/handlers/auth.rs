// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration, login, logout and the current-user endpoint.
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use taskboard_common::{LoginRequest, RegisterRequest, UserView};

use crate::auth::{clear_session_cookie, service, session_cookie, Principal};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// Build the response headers that attach a freshly minted session.
fn session_headers(token: &str, settings: &Settings) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie(token, settings.cookie_secure)?);
    Ok(headers)
}

/// `POST /api/auth/register`
pub async fn register<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = service::register(&state.storage, payload).await?;

    // a new account is logged in immediately
    let token = state.sessions.issue(&user.id)?;
    let headers = session_headers(&token, &state.settings)?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(json!({ "success": true, "user": user })),
    ))
}

/// `POST /api/auth/login`
pub async fn login<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = service::login(&state.storage, payload).await?;

    let token = state.sessions.issue(&user.id)?;
    let headers = session_headers(&token, &state.settings)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(json!({ "success": true, "user": user })),
    ))
}

/// `POST /api/auth/logout`
///
/// Idempotent: the cookie is cleared whether or not a session was
/// present. The token itself stays valid until it expires; only the
/// client's copy is removed.
pub async fn logout<S: Storage + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        clear_session_cookie(state.settings.cookie_secure)?,
    );
    Ok((StatusCode::OK, headers, Json(json!({ "success": true }))))
}

/// `GET /api/auth/me`
pub async fn me<S: Storage + 'static>(
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
