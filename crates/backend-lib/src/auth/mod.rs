// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod cookie;
pub mod password;
pub mod service;
pub mod session;

pub use cookie::{clear_session_cookie, parse_cookie, session_cookie, SESSION_COOKIE};
pub use password::{hash_password, hash_password_secure, verify_password};
pub use session::{Claims, Principal, SessionCodec, SESSION_TTL};
