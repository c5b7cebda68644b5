// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token issuing and verification.
//!
//! Sessions are self-contained HS256-signed tokens carrying the user id
//! and a 24-hour expiry. Nothing is kept server-side: a token is valid
//! iff its signature verifies under the process secret and it has not
//! expired, so verification is a pure function of token + current time
//! and can run on any number of concurrent requests without locking.
//! The trade-off is that a still-valid token cannot be revoked before
//! expiry; logout only removes the client's cookie.
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::AppError;

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24); // 24 hours

/// Signed token payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expires at (Unix seconds)
    pub exp: u64,
}

/// The authenticated identity attached to a request after successful
/// token verification. Constructed only by the request gate and lives
/// for a single request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
}

/// Mints and verifies session tokens.
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is exact, no clock leeway
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for the given subject, expiring after the
    /// configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let iat = unix_now()?;
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.ttl.as_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign session token: {e}")))
    }

    /// Verify a token and return its subject.
    ///
    /// Structural parse failures, signature mismatches and expired
    /// tokens all collapse to `None`; callers cannot tell which check
    /// failed, so a rejected token cannot be used as an oracle.
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.sub)
            .ok()
    }
}

fn unix_now() -> Result<u64, AppError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AppError::Internal(format!("system clock before Unix epoch: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionCodec {
        SessionCodec::new(b"test-secret", SESSION_TTL)
    }

    fn token_with_bounds(codec: &SessionCodec, sub: &str, iat: u64, exp: u64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            iat,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &codec.encoding).unwrap()
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec();
        let token = codec.issue("user-123").unwrap();
        assert_eq!(codec.verify(&token).as_deref(), Some("user-123"));
    }

    #[test]
    fn test_distinct_subjects_yield_distinct_tokens() {
        let codec = codec();
        let a = codec.issue("user-a").unwrap();
        let b = codec.issue("user-b").unwrap();
        assert_ne!(a, b);
        assert_eq!(codec.verify(&b).as_deref(), Some("user-b"));
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec();
        let now = unix_now().unwrap();

        // one second of validity left: still accepted
        let token = token_with_bounds(&codec, "user-123", now - 100, now + 1);
        assert!(codec.verify(&token).is_some());

        // one second past expiry: rejected
        let token = token_with_bounds(&codec, "user-123", now - 100, now - 1);
        assert!(codec.verify(&token).is_none());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let token = codec.issue("user-123").unwrap();

        // flip one character inside the signed payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let payload = &mut parts[1];
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.replace_range(payload.len() - 1.., flipped);
        let tampered = parts.join(".");

        assert!(codec.verify(&tampered).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = codec();
        let other = SessionCodec::new(b"another-secret", SESSION_TTL);
        let token = codec.issue("user-123").unwrap();
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let codec = codec();
        assert!(codec.verify("").is_none());
        assert!(codec.verify("not-a-token").is_none());
        assert!(codec.verify("a.b.c").is_none());
    }
}
