// ============================
// crates/backend-lib/src/auth/cookie.rs
// ============================
//! Session cookie transport: the token is held entirely by the client;
//! the server only attaches it to responses and extracts it from
//! inbound requests.
use axum::http::{HeaderMap, HeaderValue};

use crate::error::AppError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Cookie lifetime in seconds, matching the session token TTL
pub const SESSION_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Build the `Set-Cookie` value attaching a session token.
/// HttpOnly cookie scoped to path / with SameSite=Lax; `Secure` is
/// added when configured for production.
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Max-Age={SESSION_COOKIE_MAX_AGE_SECS}; Path=/"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))
}

/// Build the `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly; SameSite=Lax; Path=/"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))
}

/// Extract a named cookie from the request headers.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}
