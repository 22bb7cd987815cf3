// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Theme
//!
//! Light and dark palettes with WCAG contrast validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Theme validation errors
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),

    #[error("Insufficient contrast ratio: {actual:.2} (required: {required:.2})")]
    InsufficientContrast { actual: f64, required: f64 },
}

/// Theme mode (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Palette used by every screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
    pub body_text: String,
    pub primary: String,
    pub success: String,
    pub danger: String,
    pub info_block: String,
}

/// A complete theme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Theme {
    /// Theme for a mode
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => light(),
            ThemeMode::Dark => dark(),
        }
    }

    /// Validate theme has sufficient contrast ratios for accessibility.
    /// Uses WCAG 2.0 AA standard (4.5:1 for normal text).
    pub fn validate_accessibility(&self) -> Result<(), ThemeError> {
        let bg = parse_hex(&self.colors.background)?;
        for color in [&self.colors.text, &self.colors.body_text] {
            let ratio = contrast_ratio(bg, parse_hex(color)?);
            if ratio < 4.5 {
                return Err(ThemeError::InsufficientContrast {
                    actual: ratio,
                    required: 4.5,
                });
            }
        }
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        light()
    }
}

/// Parse a hex color string to RGB tuple
fn parse_hex(color: &str) -> Result<(u8, u8, u8), ThemeError> {
    let invalid = || ThemeError::InvalidHexColor(color.to_string());
    let digits = color.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Relative luminance of a color (WCAG formula)
fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// WCAG contrast ratio between two colors
fn contrast_ratio(c1: (u8, u8, u8), c2: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(c1);
    let l2 = relative_luminance(c2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

fn light() -> Theme {
    Theme {
        mode: ThemeMode::Light,
        colors: ThemeColors {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            body_text: "#333333".to_string(),
            primary: "#26374a".to_string(),
            success: "#03823c".to_string(),
            danger: "#d3080c".to_string(),
            info_block: "#f2f2f2".to_string(),
        },
    }
}

fn dark() -> Theme {
    Theme {
        mode: ThemeMode::Dark,
        colors: ThemeColors {
            background: "#121212".to_string(),
            text: "#ffffff".to_string(),
            body_text: "#e0e0e0".to_string(),
            primary: "#7da7d9".to_string(),
            success: "#5cc28a".to_string(),
            danger: "#ff6b6b".to_string(),
            info_block: "#1e1e1e".to_string(),
        },
    }
}
