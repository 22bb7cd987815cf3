// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! A string key-value store (SQLite on device, in-memory for tests) and
//! the region-scoped [`StorageService`] handle shared with screens.

mod error;
mod memory;
mod sqlite;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage key for the user's selected region
pub const REGION_KEY: &str = "Region";

/// Persistent string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Region-scoped storage handle.
///
/// Wraps the store and remembers the active region, which is persisted
/// under [`REGION_KEY`].
pub struct StorageService {
    store: Arc<dyn KeyValueStore>,
    region: RwLock<Option<String>>,
}

impl StorageService {
    /// Creates the service, loading the persisted region.
    ///
    /// An unreadable region is treated as unset.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let region = store
            .get(REGION_KEY)
            .ok()
            .flatten()
            .filter(|r| !r.is_empty());
        Self {
            store,
            region: RwLock::new(region),
        }
    }

    /// The underlying store
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// The active region, if one is selected
    pub fn region(&self) -> Option<String> {
        self.region
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Selects a region and persists it.
    ///
    /// Returns `true` if the region changed.
    pub fn set_region(&self, region: Option<String>) -> Result<bool, StorageError> {
        let region = region.filter(|r| !r.is_empty());
        let mut current = self.region.write().map_err(|_| StorageError::LockPoisoned)?;
        if *current == region {
            return Ok(false);
        }

        match &region {
            Some(r) => self.store.set(REGION_KEY, r)?,
            None => {
                self.store.remove(REGION_KEY)?;
            }
        }
        *current = region;
        Ok(true)
    }

    /// Loads and decodes a JSON value. Missing or malformed values yield `None`.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// Encodes and stores a JSON value.
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_loaded_from_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(REGION_KEY, "ON").unwrap();

        let service = StorageService::new(store);
        assert_eq!(service.region().as_deref(), Some("ON"));
    }

    #[test]
    fn test_set_region_reports_change() {
        let store = Arc::new(MemoryStore::new());
        let service = StorageService::new(store.clone());

        assert!(service.set_region(Some("NL".into())).unwrap());
        assert!(!service.set_region(Some("NL".into())).unwrap());
        assert_eq!(store.get(REGION_KEY).unwrap().as_deref(), Some("NL"));

        assert!(service.set_region(None).unwrap());
        assert_eq!(store.get(REGION_KEY).unwrap(), None);
    }

    #[test]
    fn test_empty_region_means_unset() {
        let service = StorageService::new(Arc::new(MemoryStore::new()));
        assert!(!service.set_region(Some(String::new())).unwrap());
        assert_eq!(service.region(), None);
    }

    #[test]
    fn test_load_json_ignores_malformed() {
        let store = Arc::new(MemoryStore::new());
        store.set("k", "{not json").unwrap();
        let service = StorageService::new(store);

        let value: Option<Vec<u32>> = service.load_json("k");
        assert!(value.is_none());
    }
}
