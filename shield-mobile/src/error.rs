// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly error types.

use shield_core::{ConfigError, ShieldError};

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ShieldError> for MobileError {
    fn from(err: ShieldError) -> Self {
        match err {
            ShieldError::Config(e) => MobileError::InvalidConfig(e.to_string()),
            ShieldError::Storage(e) => MobileError::StorageError(e.to_string()),
            ShieldError::Backend(e) => MobileError::NetworkError(e.to_string()),
            ShieldError::Internal(msg) => MobileError::Internal(msg),
        }
    }
}

impl From<ConfigError> for MobileError {
    fn from(err: ConfigError) -> Self {
        MobileError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for MobileError {
    fn from(err: serde_json::Error) -> Self {
        MobileError::SerializationError(err.to_string())
    }
}
