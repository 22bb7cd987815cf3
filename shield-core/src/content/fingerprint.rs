// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content fingerprints using SHA-256
//!
//! Fingerprints are only used to tell whether two region documents differ.
//! They carry no integrity or authenticity guarantee.

use ring::digest::{Context, SHA256};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::types::RegionContent;

/// Fingerprint of a serialized document, in format "sha256:hexstring"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    /// Fingerprint raw bytes
    ///
    /// # Example
    /// ```
    /// use shield_core::ContentFingerprint;
    ///
    /// let fp = ContentFingerprint::of_bytes(b"hello world");
    /// assert!(fp.as_str().starts_with("sha256:"));
    /// ```
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut context = Context::new(&SHA256);
        context.update(data);
        let digest = context.finish();
        Self(format!("sha256:{}", hex::encode(digest.as_ref())))
    }

    /// The "sha256:hexstring" form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the algorithm prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix("sha256:").unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a region document
///
/// The document is serialized to canonical JSON first (object keys sorted
/// at every depth), so documents that differ only in key order produce the
/// same fingerprint.
pub fn fingerprint(content: &RegionContent) -> Result<ContentFingerprint, serde_json::Error> {
    let canonical = canonical_json(content)?;
    Ok(ContentFingerprint::of_bytes(canonical.as_bytes()))
}

/// Canonical JSON text for a region document
pub fn canonical_json(content: &RegionContent) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(content)?;
    serde_json::to_string(&canonicalize(value))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
