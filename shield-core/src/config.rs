// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! App configuration
//!
//! Read from the environment the app was built or launched with:
//! `TEST_MODE`, `RETRIEVE_URL`, `SUBMIT_URL`, `HMAC_KEY`, plus a few
//! optional tuning knobs.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("HMAC_KEY must be hex encoded")]
    InvalidHmacKey,

    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Startup configuration for the app root
#[derive(Clone)]
pub struct AppConfig {
    /// Show the demo shell instead of the live navigator
    pub test_mode: bool,

    /// Backend endpoint for downloads (region content, key retrieval)
    pub retrieve_url: String,

    /// Backend endpoint for uploads
    pub submit_url: String,

    /// Shared secret for signing retrieval requests
    pub hmac_key: Vec<u8>,

    /// Upper bound on one backend fetch
    pub fetch_timeout: Duration,

    /// Maximum region document size (bytes)
    pub max_content_size: u64,

    /// Directory holding the local database
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            retrieve_url: "http://localhost:8000".to_string(),
            submit_url: "http://localhost:8000".to_string(),
            hmac_key: Vec::new(),
            fetch_timeout: Duration::from_secs(30),
            max_content_size: 1024 * 1024, // 1 MiB
            data_dir: PathBuf::from("."),
        }
    }
}

// Keep the shared secret out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("test_mode", &self.test_mode)
            .field("retrieve_url", &self.retrieve_url)
            .field("submit_url", &self.submit_url)
            .field("hmac_key", &"<redacted>")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_content_size", &self.max_content_size)
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("TEST_MODE") {
            config.test_mode = parse_bool(&value);
        }
        if let Some(value) = lookup("RETRIEVE_URL") {
            config.retrieve_url = value;
        }
        if let Some(value) = lookup("SUBMIT_URL") {
            config.submit_url = value;
        }
        if let Some(value) = lookup("HMAC_KEY") {
            config.hmac_key = hex::decode(value.trim()).map_err(|_| ConfigError::InvalidHmacKey)?;
        }
        if let Some(value) = lookup("FETCH_TIMEOUT_SECS") {
            let secs = parse_number("FETCH_TIMEOUT_SECS", &value)?;
            // A zero bound would fail every fetch.
            if secs == 0 {
                return Err(ConfigError::InvalidNumber {
                    name: "FETCH_TIMEOUT_SECS",
                    value,
                });
            }
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("MAX_CONTENT_BYTES") {
            config.max_content_size = parse_number("MAX_CONTENT_BYTES", &value)?;
        }
        if let Some(value) = lookup("SHIELD_DATA_DIR") {
            config.data_dir = PathBuf::from(value);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that both endpoints are absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("RETRIEVE_URL", &self.retrieve_url)?;
        validate_url("SUBMIT_URL", &self.submit_url)?;
        Ok(())
    }

    /// Path of the local database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("shield.db")
    }

    /// Enable the demo shell
    pub fn with_test_mode(mut self) -> Self {
        self.test_mode = true;
        self
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            name,
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
