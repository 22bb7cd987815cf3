// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend Module
//!
//! The capability screens and the synchronizer use to reach the backend.
//! A client is tied to one region and is rebuilt whenever the region
//! changes, through a [`BackendFactory`].

mod client;
mod error;
mod mock;
pub mod signing;

pub use client::{BackendClient, DEFAULT_CONFIGURATION_REGION};
pub use error::BackendError;
pub use mock::MockContentSource;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::content::RegionContent;

/// Anything that can serve the latest region content document.
#[async_trait]
pub trait RegionContentSource: Send + Sync {
    /// Fetch the current region document.
    async fn get_region_content(&self) -> Result<RegionContent, BackendError>;

    /// Region this source was built for.
    fn region(&self) -> Option<&str> {
        None
    }
}

/// Builds the backend capability for a region.
pub trait BackendFactory: Send + Sync {
    fn create(&self, region: Option<&str>) -> Result<Arc<dyn RegionContentSource>, BackendError>;
}

/// Factory producing HTTP [`BackendClient`]s from the app config.
#[derive(Debug, Clone)]
pub struct HttpBackendFactory {
    config: AppConfig,
}

impl HttpBackendFactory {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl BackendFactory for HttpBackendFactory {
    fn create(&self, region: Option<&str>) -> Result<Arc<dyn RegionContentSource>, BackendError> {
        let client = BackendClient::new(&self.config, region.map(str::to_string))?;
        Ok(Arc::new(client))
    }
}
