// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock content source for testing and the demo shell.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{BackendError, RegionContentSource};
use crate::content::RegionContent;

/// Content source with a scripted response.
///
/// Counts calls and can delay each answer to simulate a slow network.
#[derive(Debug)]
pub struct MockContentSource {
    response: Mutex<Result<RegionContent, String>>,
    delay: Option<Duration>,
    region: Option<String>,
    calls: AtomicUsize,
}

impl MockContentSource {
    /// Always answers with `content`.
    pub fn returning(content: RegionContent) -> Self {
        Self::with_response(Ok(content))
    }

    /// Always fails with [`BackendError::Unavailable`].
    pub fn failing(message: &str) -> Self {
        Self::with_response(Err(message.to_string()))
    }

    fn with_response(response: Result<RegionContent, String>) -> Self {
        Self {
            response: Mutex::new(response),
            delay: None,
            region: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report `region` as this source's region.
    pub fn for_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Replace the scripted answer.
    pub fn set_content(&self, content: RegionContent) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = Ok(content);
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegionContentSource for MockContentSource {
    async fn get_region_content(&self) -> Result<RegionContent, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map_err(BackendError::Unavailable)
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
