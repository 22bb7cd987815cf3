// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Initial content resolution (cache → bundled)

use std::sync::Arc;

use shield_core::{
    bundled_region_content, ContentSynchronizer, KeyValueStore, MemoryStore, RecordingReporter,
    REGION_CONTENT_KEY,
};

use super::support::{harness_with_store, ontario_content, BrokenStore, TIMEOUT};

#[test]
fn test_empty_cache_uses_bundled() {
    let h = harness_with_store(Arc::new(MemoryStore::new()));
    assert_eq!(*h.sync.resolve_initial_content(), bundled_region_content());
    assert!(h.reporter.messages().is_empty());
}

#[test]
fn test_cached_content_is_preferred() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(REGION_CONTENT_KEY, &ontario_content().to_json().unwrap())
        .unwrap();
    let h = harness_with_store(store);

    assert_eq!(*h.sync.resolve_initial_content(), ontario_content());
}

#[test]
fn test_malformed_cache_falls_back_to_bundled() {
    let store = Arc::new(MemoryStore::new());
    store.set(REGION_CONTENT_KEY, "{\"Active\": [").unwrap();
    let h = harness_with_store(store);

    assert_eq!(*h.sync.resolve_initial_content(), bundled_region_content());
    assert_eq!(h.reporter.messages().len(), 1);
    assert!(h.reporter.messages()[0].contains("malformed"));
}

#[test]
fn test_wrong_shape_cache_falls_back_to_bundled() {
    let store = Arc::new(MemoryStore::new());
    store.set(REGION_CONTENT_KEY, r#"{"regions":["ON"]}"#).unwrap();
    let h = harness_with_store(store);

    assert_eq!(*h.sync.resolve_initial_content(), bundled_region_content());
}

#[test]
fn test_read_failure_falls_back_to_bundled() {
    let reporter = Arc::new(RecordingReporter::new());
    let sync = ContentSynchronizer::new(Arc::new(BrokenStore), reporter.clone(), TIMEOUT);

    assert_eq!(*sync.resolve_initial_content(), bundled_region_content());
    assert_eq!(reporter.exception_count(), 0);
    assert_eq!(reporter.messages().len(), 1);
}

#[test]
fn test_resolved_content_is_published() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(REGION_CONTENT_KEY, &ontario_content().to_json().unwrap())
        .unwrap();
    let h = harness_with_store(store);
    let rx = h.sync.subscribe();

    let resolved = h.sync.resolve_initial_content();
    assert!(Arc::ptr_eq(&resolved, &*rx.borrow()));
}
