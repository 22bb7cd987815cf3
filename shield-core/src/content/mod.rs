// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Region content module
//!
//! Provides the regional content document shown across the app:
//! - Active region identifiers
//! - Per-locale text sections
//!
//! Content is compared using SHA-256 fingerprints and cached locally.
//! Bundled content serves as fallback when no cached copy is usable.

mod bundled;
mod fingerprint;
mod generation;
mod synchronizer;
mod types;

use std::time::Duration;
use thiserror::Error;

use crate::backend::BackendError;
use crate::storage::StorageError;

pub use bundled::bundled_region_content;
pub use fingerprint::{canonical_json, fingerprint, ContentFingerprint};
pub use generation::{Generation, GenerationToken};
pub use synchronizer::{ContentSynchronizer, SyncOutcome};
pub use types::{RegionContent, NO_ACTIVE_REGION};

/// Storage key for the cached region document
pub const REGION_CONTENT_KEY: &str = "regionContentKey";

/// Errors that can occur while synchronizing region content
#[derive(Debug, Error)]
pub enum ContentError {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend error (network/remote)
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend did not answer in time
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
}
