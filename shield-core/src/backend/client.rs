// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend client for the retrieve/submit service
//!
//! This module provides HTTP-based access with:
//! - Size limits on downloaded documents
//! - Timeout configuration
//! - HMAC-signed retrieval URLs

use async_trait::async_trait;
use std::time::SystemTime;

use super::signing::{sign_retrieve_request, MCC_CODE};
use super::{BackendError, RegionContentSource};
use crate::config::AppConfig;
use crate::content::RegionContent;

#[cfg(feature = "content-updates")]
use reqwest::Client;

/// Region used for exposure configuration when none is selected
pub const DEFAULT_CONFIGURATION_REGION: &str = "CA";

/// Client for one backend deployment and one region.
///
/// Built once per region; holds no persistent state.
pub struct BackendClient {
    #[cfg(feature = "content-updates")]
    client: Client,
    retrieve_url: String,
    submit_url: String,
    hmac_key: Vec<u8>,
    region: Option<String>,
    max_content_size: u64,
}

impl BackendClient {
    /// Create a new backend client from config
    pub fn new(config: &AppConfig, region: Option<String>) -> Result<Self, BackendError> {
        config
            .validate()
            .map_err(|e| BackendError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            #[cfg(feature = "content-updates")]
            client: Client::builder()
                .timeout(config.fetch_timeout)
                .user_agent(format!(
                    "Shield/{}",
                    option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
                ))
                .build()?,
            retrieve_url: config.retrieve_url.trim_end_matches('/').to_string(),
            submit_url: config.submit_url.trim_end_matches('/').to_string(),
            hmac_key: config.hmac_key.clone(),
            region,
            max_content_size: config.max_content_size,
        })
    }

    /// Retrieve endpoint (no trailing slash)
    pub fn retrieve_url(&self) -> &str {
        &self.retrieve_url
    }

    /// Submit endpoint (no trailing slash)
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// URL of the region content document
    pub fn region_content_url(&self) -> String {
        format!("{}/exposure-configuration/region.json", self.retrieve_url)
    }

    /// URL of the exposure configuration for the active region
    pub fn exposure_configuration_url(&self) -> String {
        let region = self
            .region
            .as_deref()
            .unwrap_or(DEFAULT_CONFIGURATION_REGION);
        format!(
            "{}/exposure-configuration/{}.json",
            self.retrieve_url, region
        )
    }

    /// Signed URL for retrieving the key file of `period` at time `at`
    pub fn signed_retrieve_url(&self, period: u32, at: SystemTime) -> String {
        let signature = sign_retrieve_request(&self.hmac_key, period, at);
        format!(
            "{}/retrieve/{}/{}/{}",
            self.retrieve_url, MCC_CODE, period, signature
        )
    }

    fn check_size(&self, size: u64) -> Result<(), BackendError> {
        if size > self.max_content_size {
            return Err(BackendError::TooLarge {
                size,
                max: self.max_content_size,
            });
        }
        Ok(())
    }
}

#[cfg(feature = "content-updates")]
#[async_trait]
impl RegionContentSource for BackendClient {
    async fn get_region_content(&self) -> Result<RegionContent, BackendError> {
        let response = self.client.get(self.region_content_url()).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::HttpError(response.status().as_u16()));
        }

        // Check content length before downloading
        if let Some(len) = response.content_length() {
            self.check_size(len)?;
        }

        let data = response.bytes().await?;

        // Verify size after download (in case content-length was missing)
        self.check_size(data.len() as u64)?;

        Ok(RegionContent::from_slice(&data)?)
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Without the content-updates feature every fetch fails
#[cfg(not(feature = "content-updates"))]
#[async_trait]
impl RegionContentSource for BackendClient {
    async fn get_region_content(&self) -> Result<RegionContent, BackendError> {
        Err(BackendError::FeatureDisabled)
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
