// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures for content tests

use std::sync::Arc;
use std::time::Duration;

use shield_core::{
    ContentSynchronizer, KeyValueStore, MemoryStore, RecordingReporter, RegionContent,
    StorageError,
};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn ontario_content() -> RegionContent {
    RegionContent::from_json(
        r#"{"Active":["ON"],"en":{"Home":{"Title":"Ontario"}},"fr":{"Home":{"Title":"Ontario"}}}"#,
    )
    .unwrap()
}

pub fn atlantic_content() -> RegionContent {
    RegionContent::from_json(
        r#"{"Active":["NL","NS","PE","NB"],"en":{"Home":{"Title":"Atlantic"}},"fr":{"Home":{"Title":"Atlantique"}}}"#,
    )
    .unwrap()
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub reporter: Arc<RecordingReporter>,
    pub sync: ContentSynchronizer,
}

pub fn harness() -> Harness {
    harness_with_store(Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(store: Arc<MemoryStore>) -> Harness {
    let reporter = Arc::new(RecordingReporter::new());
    let sync = ContentSynchronizer::new(store.clone(), reporter.clone(), TIMEOUT);
    Harness {
        store,
        reporter,
        sync,
    }
}

/// Store whose reads and writes always fail
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk unmounted".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".into()))
    }

    fn remove(&self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable("disk full".into()))
    }
}
