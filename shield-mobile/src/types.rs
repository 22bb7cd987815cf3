// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! UniFFI records and enums mirroring the core types.

use shield_core::{AccessibilitySettings, AppConfig, ConfigError, SafeAreaInsets, SyncOutcome};

/// Screen insets reported by the platform (points).
#[derive(Debug, Clone, Copy, Default, uniffi::Record)]
pub struct MobileSafeAreaInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl From<MobileSafeAreaInsets> for SafeAreaInsets {
    fn from(insets: MobileSafeAreaInsets) -> Self {
        SafeAreaInsets {
            top: insets.top,
            right: insets.right,
            bottom: insets.bottom,
            left: insets.left,
        }
    }
}

/// Startup configuration passed in by the platform build.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileAppConfig {
    /// Show the demo shell
    pub test_mode: bool,
    /// Retrieve endpoint
    pub retrieve_url: String,
    /// Submit endpoint
    pub submit_url: String,
    /// Hex-encoded shared secret
    pub hmac_key: String,
    /// Backend fetch bound; the core default applies when unset
    pub fetch_timeout_secs: Option<u64>,
    /// Device locale, e.g. "fr-CA"
    pub device_locale: Option<String>,
    /// Use the dark palette
    pub dark_mode: bool,
    pub safe_area: MobileSafeAreaInsets,
}

impl MobileAppConfig {
    /// Core config rooted at `data_dir`, parsed the same way as the
    /// environment so both paths validate identically.
    pub fn to_core_config(&self, data_dir: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| match name {
            "TEST_MODE" => Some(self.test_mode.to_string()),
            "RETRIEVE_URL" => Some(self.retrieve_url.clone()),
            "SUBMIT_URL" => Some(self.submit_url.clone()),
            "HMAC_KEY" => Some(self.hmac_key.clone()),
            "FETCH_TIMEOUT_SECS" => self.fetch_timeout_secs.map(|secs| secs.to_string()),
            "SHIELD_DATA_DIR" => Some(data_dir.to_string()),
            _ => None,
        })
    }
}

/// Result of one sync attempt.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum MobileSyncOutcome {
    /// Backend copy matched the active content
    Unchanged,
    /// New content is active
    Updated { active_regions: Vec<String> },
    /// Superseded by a region change
    Stale,
    /// Fetch failed; the previous content stays active
    Failed { reason: String },
}

impl From<SyncOutcome> for MobileSyncOutcome {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Unchanged => MobileSyncOutcome::Unchanged,
            SyncOutcome::Updated(content) => MobileSyncOutcome::Updated {
                active_regions: content
                    .active_regions()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            SyncOutcome::Stale => MobileSyncOutcome::Stale,
            SyncOutcome::Failed(reason) => MobileSyncOutcome::Failed { reason },
        }
    }
}

/// Accessibility preferences.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct MobileAccessibilitySettings {
    pub screen_reader_enabled: bool,
    pub reduce_motion_enabled: bool,
    pub bold_text_enabled: bool,
    pub font_scale: f32,
}

impl From<AccessibilitySettings> for MobileAccessibilitySettings {
    fn from(settings: AccessibilitySettings) -> Self {
        MobileAccessibilitySettings {
            screen_reader_enabled: settings.screen_reader_enabled,
            reduce_motion_enabled: settings.reduce_motion_enabled,
            bold_text_enabled: settings.bold_text_enabled,
            font_scale: settings.font_scale,
        }
    }
}

impl From<MobileAccessibilitySettings> for AccessibilitySettings {
    fn from(settings: MobileAccessibilitySettings) -> Self {
        AccessibilitySettings {
            screen_reader_enabled: settings.screen_reader_enabled,
            reduce_motion_enabled: settings.reduce_motion_enabled,
            bold_text_enabled: settings.bold_text_enabled,
            font_scale: settings.font_scale,
        }
    }
}
