// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the taskboard server.

pub mod require_session;

pub use require_session::require_session;
