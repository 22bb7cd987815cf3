// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend error types.

use thiserror::Error;

/// Errors that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network/request error
    #[cfg(feature = "content-updates")]
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Content too large
    #[error("Content too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// Response body is not a region document
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Endpoint could not be used
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Backend could not be reached or refused the request
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Content updates feature is not enabled
    #[error("Content updates feature is not enabled")]
    FeatureDisabled,
}
