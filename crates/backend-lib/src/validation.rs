// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request input validation.
//!
//! Validation runs before any credential check or storage write, and
//! every violated field is reported, not just the first one found.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use taskboard_common::{LoginRequest, RegisterRequest};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Minimum full-name length after trimming
pub const MIN_NAME_LENGTH: usize = 2;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// A single violated input constraint
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check an email address against the standard address pattern
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Check a display name (trimmed length)
pub fn is_valid_full_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_LENGTH
}

/// Validate a registration request, enumerating all violations
pub fn validate_register(req: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_full_name(&req.full_name) {
        errors.push(FieldError::new(
            "fullName",
            format!("Full name must be at least {MIN_NAME_LENGTH} characters"),
        ));
    }

    if !is_valid_email(req.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    if req.password != req.confirm_password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    errors
}

/// Validate a login request, enumerating all violations
pub fn validate_login(req: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_email(req.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}
