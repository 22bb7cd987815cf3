// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locale selection
//!
//! The app ships English and French. Device locales are mapped onto one of
//! the two, falling back to English.

use serde::{Deserialize, Serialize};

/// Storage key for the user's chosen locale
pub const LOCALE_KEY: &str = "locale";

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "fr")]
    French,
}

impl Locale {
    /// Get the ISO 639-1 language code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::French => "fr",
        }
    }

    /// Parse a locale from its code
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::English),
            "fr" => Some(Locale::French),
            _ => None,
        }
    }

    /// Best match for a device locale such as "fr-CA"
    pub fn from_device(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Display name in the locale's own language
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::French => "Français",
        }
    }
}

/// Get all available locales
pub fn get_available_locales() -> Vec<Locale> {
    vec![Locale::English, Locale::French]
}
