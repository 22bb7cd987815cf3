// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Region content document
//!
//! The document the backend serves at `exposure-configuration/region.json`
//! and the app caches under [`REGION_CONTENT_KEY`](super::REGION_CONTENT_KEY).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::i18n::Locale;

/// Marker used in `Active` when the app is not active in any region.
pub const NO_ACTIVE_REGION: &str = "None";

/// Active regions plus per-locale text shown to the user.
///
/// Locale sections are opaque JSON: screens pick the keys they need.
/// Locales beyond `en` and `fr` land in `other_locales`, a sorted map, so
/// that serialization is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionContent {
    /// Region identifiers where the app is active (e.g. "ON", "NL")
    #[serde(rename = "Active")]
    pub active: Vec<String>,
    /// English text section
    pub en: Value,
    /// French text section
    pub fr: Value,
    /// Any further locale sections, keyed by language code
    #[serde(flatten)]
    pub other_locales: BTreeMap<String, Value>,
}

impl RegionContent {
    /// Empty document: no active region, blank text.
    pub fn none() -> Self {
        Self {
            active: vec![NO_ACTIVE_REGION.to_string()],
            en: Value::String(String::new()),
            fr: Value::String(String::new()),
            other_locales: BTreeMap::new(),
        }
    }

    /// Parse a serialized document
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Parse a serialized document from raw bytes
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Active regions, without the "None" marker
    pub fn active_regions(&self) -> Vec<&str> {
        self.active
            .iter()
            .map(String::as_str)
            .filter(|r| *r != NO_ACTIVE_REGION)
            .collect()
    }

    /// Whether the given region is listed as active (case-insensitive)
    pub fn is_region_active(&self, region: &str) -> bool {
        self.active_regions()
            .iter()
            .any(|r| r.eq_ignore_ascii_case(region))
    }

    /// Text section for a locale
    pub fn locale_section(&self, locale: Locale) -> Option<&Value> {
        match locale {
            Locale::English => Some(&self.en),
            Locale::French => Some(&self.fr),
        }
    }

    /// Text section for a language code, including extra locales
    pub fn section_for_code(&self, code: &str) -> Option<&Value> {
        match Locale::from_code(code) {
            Some(locale) => self.locale_section(locale),
            None => self.other_locales.get(code),
        }
    }

    /// Look up a dotted path (e.g. `"Home.NoRegion"`) in a locale section.
    ///
    /// Returns `None` unless the path ends on a string.
    pub fn text(&self, locale: Locale, path: &str) -> Option<&str> {
        let mut node = self.locale_section(locale)?;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        node.as_str()
    }
}

impl Default for RegionContent {
    fn default() -> Self {
        Self::none()
    }
}
