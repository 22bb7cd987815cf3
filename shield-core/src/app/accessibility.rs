// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Accessibility settings shared with every screen.

use serde::{Deserialize, Serialize};

use crate::storage::{StorageError, StorageService};

/// Storage key for accessibility settings
pub const ACCESSIBILITY_KEY: &str = "accessibilitySettings";

const MIN_FONT_SCALE: f32 = 0.5;
const MAX_FONT_SCALE: f32 = 3.0;

/// Accessibility preferences reported by the platform or set by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub screen_reader_enabled: bool,
    pub reduce_motion_enabled: bool,
    pub bold_text_enabled: bool,
    pub font_scale: f32,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            screen_reader_enabled: false,
            reduce_motion_enabled: false,
            bold_text_enabled: false,
            font_scale: 1.0,
        }
    }
}

impl AccessibilitySettings {
    /// Load persisted settings, or defaults.
    pub fn restore(storage: &StorageService) -> Self {
        storage
            .load_json::<AccessibilitySettings>(ACCESSIBILITY_KEY)
            .map(AccessibilitySettings::clamped)
            .unwrap_or_default()
    }

    pub fn persist(&self, storage: &StorageService) -> Result<(), StorageError> {
        storage.save_json(ACCESSIBILITY_KEY, &self.clamped())
    }

    /// Font scale kept within what layouts can handle
    pub fn clamped(self) -> Self {
        let font_scale = if self.font_scale.is_finite() {
            self.font_scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
        } else {
            1.0
        };
        Self { font_scale, ..self }
    }
}
