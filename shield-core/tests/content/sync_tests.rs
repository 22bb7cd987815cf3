// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use shield_core::{
    ContentSynchronizer, Generation, KeyValueStore, MemoryStore, MockContentSource,
    RecordingReporter, RegionContent, StorageError, SyncOutcome, REGION_CONTENT_KEY,
};

use super::support::{atlantic_content, harness, ontario_content, TIMEOUT};

/// Store that reads normally and refuses every write
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only filesystem".into()))
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.remove(key)
    }
}

/// Store whose writes race a region change: each `set` starts a thread
/// that advances the generation, then checks whether it got through
/// before the write returned.
struct RacingStore {
    inner: MemoryStore,
    generation: Generation,
    advancer: Mutex<Option<JoinHandle<()>>>,
    advanced_during_write: AtomicBool,
}

impl RacingStore {
    fn new(generation: Generation) -> Self {
        Self {
            inner: MemoryStore::new(),
            generation,
            advancer: Mutex::new(None),
            advanced_during_write: AtomicBool::new(false),
        }
    }

    fn join_advancer(&self) {
        if let Some(handle) = self.advancer.lock().unwrap().take() {
            handle.join().unwrap();
        }
    }
}

impl KeyValueStore for RacingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let generation = self.generation.clone();
        let done = Arc::new(AtomicBool::new(false));
        let done_in_thread = Arc::clone(&done);
        let handle = thread::spawn(move || {
            generation.advance();
            done_in_thread.store(true, Ordering::SeqCst);
        });
        *self.advancer.lock().unwrap() = Some(handle);

        thread::sleep(Duration::from_millis(50));
        if done.load(Ordering::SeqCst) {
            self.advanced_during_write.store(true, Ordering::SeqCst);
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.remove(key)
    }
}

#[tokio::test]
async fn test_identical_content_is_not_written() {
    let h = harness();
    h.store
        .set(REGION_CONTENT_KEY, &ontario_content().to_json().unwrap())
        .unwrap();
    let initial = h.sync.resolve_initial_content();
    let writes_before = h.store.write_count();
    let mut rx = h.sync.subscribe();
    rx.borrow_and_update();

    let source = MockContentSource::returning(ontario_content());
    let outcome = h
        .sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(h.store.write_count(), writes_before);
    assert!(!rx.has_changed().unwrap());
    assert!(h.reporter.messages().contains(&"content is the same".to_string()));
    assert_eq!(h.reporter.app_initialized_count(), 1);
    assert_eq!(h.reporter.splash_dismissals(), 1);
}

#[tokio::test]
async fn test_key_order_does_not_count_as_a_change() {
    let h = harness();
    let initial = RegionContent::from_json(
        r#"{"Active":["ON"],"en":{"A":"1","B":"2"},"fr":{"A":"1","B":"2"}}"#,
    )
    .unwrap();
    let reordered = RegionContent::from_json(
        r#"{"fr":{"B":"2","A":"1"},"en":{"B":"2","A":"1"},"Active":["ON"]}"#,
    )
    .unwrap();

    let source = MockContentSource::returning(reordered);
    let outcome = h
        .sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_changed_content_is_persisted_and_published() {
    let h = harness();
    let initial = h.sync.resolve_initial_content();
    let mut rx = h.sync.subscribe();
    rx.borrow_and_update();

    let source = MockContentSource::returning(atlantic_content());
    let outcome = h
        .sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert_eq!(outcome, SyncOutcome::Updated(atlantic_content()));
    assert!(rx.has_changed().unwrap());
    assert_eq!(**rx.borrow_and_update(), atlantic_content());
    assert_eq!(*h.sync.current(), atlantic_content());

    let stored = h.store.get(REGION_CONTENT_KEY).unwrap().unwrap();
    assert_eq!(RegionContent::from_json(&stored).unwrap(), atlantic_content());
    assert_eq!(h.store.write_count(), 1);
    assert_eq!(h.reporter.app_initialized_count(), 1);
}

#[tokio::test]
async fn test_second_sync_with_same_download_is_idempotent() {
    let h = harness();
    let initial = h.sync.resolve_initial_content();
    let source = MockContentSource::returning(ontario_content());
    let generation = Generation::new();

    let first = h
        .sync
        .sync_with_backend(&initial, &source, &generation.token())
        .await;
    assert!(first.is_updated());

    let current = h.sync.current();
    let second = h
        .sync
        .sync_with_backend(&current, &source, &generation.token())
        .await;

    assert_eq!(second, SyncOutcome::Unchanged);
    assert_eq!(h.store.write_count(), 1);
    assert_eq!(source.calls(), 2);
    assert_eq!(h.reporter.app_initialized_count(), 2);
}

#[tokio::test]
async fn test_fetch_failure_leaves_everything_untouched() {
    let h = harness();
    h.store
        .set(REGION_CONTENT_KEY, &ontario_content().to_json().unwrap())
        .unwrap();
    let initial = h.sync.resolve_initial_content();

    let source = MockContentSource::failing("connection refused");
    let outcome = h
        .sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert!(matches!(outcome, SyncOutcome::Failed(ref reason) if reason.contains("connection refused")));
    assert!(Arc::ptr_eq(&initial, &h.sync.current()));
    assert_eq!(h.store.write_count(), 1);
    assert_eq!(h.reporter.exception_count(), 1);
    assert_eq!(h.reporter.app_initialized_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out() {
    let h = harness();
    let initial = h.sync.resolve_initial_content();

    let source = MockContentSource::returning(atlantic_content())
        .with_delay(TIMEOUT + Duration::from_secs(60));
    let outcome = h
        .sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert!(matches!(outcome, SyncOutcome::Failed(ref reason) if reason.contains("timed out")));
    assert_eq!(h.store.write_count(), 0);
    assert!(Arc::ptr_eq(&initial, &h.sync.current()));
    assert_eq!(h.reporter.app_initialized_count(), 1);
}

#[tokio::test]
async fn test_write_failure_still_publishes() {
    let store = Arc::new(ReadOnlyStore::default());
    let reporter = Arc::new(RecordingReporter::new());
    let sync = ContentSynchronizer::new(store, reporter.clone(), TIMEOUT);
    let initial = sync.resolve_initial_content();

    let source = MockContentSource::returning(ontario_content());
    let outcome = sync
        .sync_with_backend(&initial, &source, &Generation::new().token())
        .await;

    assert_eq!(outcome, SyncOutcome::Updated(ontario_content()));
    assert_eq!(*sync.current(), ontario_content());
    assert_eq!(reporter.exception_count(), 1);
    assert!(reporter.exceptions()[0].starts_with("failed to persist region content"));
    assert_eq!(reporter.app_initialized_count(), 1);
}

#[tokio::test]
async fn test_superseded_attempt_is_discarded() {
    let h = harness();
    let initial = h.sync.resolve_initial_content();
    let generation = Generation::new();
    let token = generation.token();
    generation.advance();

    let source = MockContentSource::returning(atlantic_content());
    let outcome = h.sync.sync_with_backend(&initial, &source, &token).await;

    assert_eq!(outcome, SyncOutcome::Stale);
    assert_eq!(h.store.write_count(), 0);
    assert_eq!(*h.sync.current(), *initial);
    assert_eq!(h.reporter.exception_count(), 0);
}

#[tokio::test]
async fn test_region_change_during_write_waits_for_commit() {
    let generation = Generation::new();
    let store = Arc::new(RacingStore::new(generation.clone()));
    let reporter = Arc::new(RecordingReporter::new());
    let sync = ContentSynchronizer::new(store.clone(), reporter, TIMEOUT);
    let initial = sync.resolve_initial_content();
    let token = generation.token();

    let source = MockContentSource::returning(ontario_content());
    let outcome = sync.sync_with_backend(&initial, &source, &token).await;
    store.join_advancer();

    // The commit finished before the region change took effect.
    assert_eq!(outcome, SyncOutcome::Updated(ontario_content()));
    assert!(!store.advanced_during_write.load(Ordering::SeqCst));
    assert_eq!(generation.current(), 1);

    // Anything the old attempt tries afterwards is discarded.
    let source = MockContentSource::returning(atlantic_content());
    let late = sync.sync_with_backend(&sync.current(), &source, &token).await;
    assert_eq!(late, SyncOutcome::Stale);
    assert_eq!(*sync.current(), ontario_content());
}
