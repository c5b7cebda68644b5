// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Secret used to sign session tokens. Process-wide, read-only
    /// after startup; there is no runtime rotation.
    pub session_secret: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// Set the `Secure` attribute on the session cookie (production)
    pub cookie_secure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            session_secret: "change-me-in-production".to_string(),
            session_ttl_secs: 60 * 60 * 24, // 24 hours
            cookie_secure: false,
        }
    }
}

impl Settings {
    /// Load settings from `config/default.toml` merged with
    /// `TASKBOARD_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("config/default")
    }

    /// Load settings with an explicit config file path
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("TASKBOARD"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
