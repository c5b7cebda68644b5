// crates/backend-lib/src/handlers/mod.rs

//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod profile;
pub mod tasks;
