// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content Synchronizer - keeps region content fresh
//!
//! Resolution order at startup is cache → bundled. After the first render
//! the synchronizer fetches the backend copy once, compares fingerprints,
//! and persists and publishes the download only when it differs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::bundled::bundled_region_content;
use super::fingerprint::fingerprint;
use super::generation::GenerationToken;
use super::types::RegionContent;
use super::{ContentError, REGION_CONTENT_KEY};
use crate::backend::RegionContentSource;
use crate::reporter::Reporter;
use crate::storage::KeyValueStore;

/// Result of one synchronization attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Backend copy matches the active content
    Unchanged,
    /// Backend copy differed and is now the active content
    Updated(RegionContent),
    /// A newer attempt superseded this one; nothing was written
    Stale,
    /// Fetch failed; active and stored content are untouched
    Failed(String),
}

impl SyncOutcome {
    /// Whether the active content changed
    pub fn is_updated(&self) -> bool {
        matches!(self, SyncOutcome::Updated(_))
    }
}

/// Resolves and refreshes the active region content.
pub struct ContentSynchronizer {
    store: Arc<dyn KeyValueStore>,
    reporter: Arc<dyn Reporter>,
    publisher: watch::Sender<Arc<RegionContent>>,
    fetch_timeout: Duration,
}

impl ContentSynchronizer {
    /// Create a synchronizer. Active content starts as the bundled default
    /// until [`resolve_initial_content`](Self::resolve_initial_content) runs.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        reporter: Arc<dyn Reporter>,
        fetch_timeout: Duration,
    ) -> Self {
        let (publisher, _) = watch::channel(Arc::new(bundled_region_content()));
        Self {
            store,
            reporter,
            publisher,
            fetch_timeout,
        }
    }

    /// Load the cached document, falling back to the bundled default.
    ///
    /// A read failure or a malformed cached document is treated like an
    /// empty cache. The result becomes the active content.
    pub fn resolve_initial_content(&self) -> Arc<RegionContent> {
        let content = match self.store.get(REGION_CONTENT_KEY) {
            Ok(Some(raw)) => match RegionContent::from_json(&raw) {
                Ok(content) => content,
                Err(e) => {
                    self.reporter.log_message(&format!(
                        "cached region content is malformed, using bundled default: {}",
                        e
                    ));
                    bundled_region_content()
                }
            },
            Ok(None) => bundled_region_content(),
            Err(e) => {
                self.reporter.log_message(&format!(
                    "failed to read cached region content, using bundled default: {}",
                    e
                ));
                bundled_region_content()
            }
        };

        let content = Arc::new(content);
        self.publisher.send_replace(Arc::clone(&content));
        content
    }

    /// Currently active content
    pub fn current(&self) -> Arc<RegionContent> {
        self.publisher.borrow().clone()
    }

    /// Receiver that observes every republished document
    pub fn subscribe(&self) -> watch::Receiver<Arc<RegionContent>> {
        self.publisher.subscribe()
    }

    /// Fetch the backend copy and adopt it if it differs from `current`.
    ///
    /// Emits the app-initialized signal exactly once, whatever the outcome.
    /// Failures are reported through the reporter and never returned as
    /// errors.
    pub async fn sync_with_backend(
        &self,
        current: &RegionContent,
        source: &dyn RegionContentSource,
        token: &GenerationToken,
    ) -> SyncOutcome {
        let outcome = match self.try_sync(current, source, token).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let reason = e.to_string();
                self.reporter.log_exception(&reason, &e);
                SyncOutcome::Failed(reason)
            }
        };

        self.reporter.app_initialized();
        outcome
    }

    async fn try_sync(
        &self,
        current: &RegionContent,
        source: &dyn RegionContentSource,
        token: &GenerationToken,
    ) -> Result<SyncOutcome, ContentError> {
        let downloaded = tokio::time::timeout(self.fetch_timeout, source.get_region_content())
            .await
            .map_err(|_| ContentError::Timeout(self.fetch_timeout))??;
        self.reporter.log_message("server content ready");

        if fingerprint(current)? == fingerprint(&downloaded)? {
            self.reporter.log_message("content is the same");
            return Ok(SyncOutcome::Unchanged);
        }

        // Persist and publish while holding the generation so a region
        // change cannot slip in between the check and the commit.
        let committed = token.commit_if_current(|| {
            self.reporter.log_message("content not the same");
            self.persist(&downloaded);
            self.publisher.send_replace(Arc::new(downloaded.clone()));
        });

        match committed {
            Some(()) => Ok(SyncOutcome::Updated(downloaded)),
            None => {
                self.reporter.log_message(&format!(
                    "discarding region content from superseded attempt {}",
                    token.issued()
                ));
                Ok(SyncOutcome::Stale)
            }
        }
    }

    /// Best-effort write; failure is logged and the publish still happens.
    fn persist(&self, content: &RegionContent) {
        let result = content
            .to_json()
            .map_err(ContentError::from)
            .and_then(|json| {
                self.store
                    .set(REGION_CONTENT_KEY, &json)
                    .map_err(ContentError::from)
            });

        if let Err(e) = result {
            self.reporter
                .log_exception("failed to persist region content", &e);
        }
    }
}
