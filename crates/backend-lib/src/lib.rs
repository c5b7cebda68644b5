// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the taskboard server.

pub mod auth;
pub mod authz;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionCodec;
use crate::config::Settings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Storage backend
    pub storage: S,
    /// Session token codec; verification is stateless, so the codec is
    /// shared freely across concurrent requests
    pub sessions: SessionCodec,
    /// Settings, read-only after startup
    pub settings: Arc<Settings>,
}

impl<S> AppState<S> {
    /// Create a new application state
    pub fn new(storage: S, settings: Settings) -> Self {
        let sessions = SessionCodec::new(
            settings.session_secret.as_bytes(),
            Duration::from_secs(settings.session_ttl_secs),
        );
        Self {
            storage,
            sessions,
            settings: Arc::new(settings),
        }
    }
}
