// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HMAC signing of retrieval requests
//!
//! The retrieve endpoint only serves key files to clients that know the
//! shared key. Each request path carries
//! `HMAC-SHA256(key, "{mcc}:{period}:{hour}")`, where `hour` is the number
//! of whole hours since the Unix epoch, so a signed URL is valid for the
//! current hour only.

use ring::hmac;
use std::time::{SystemTime, UNIX_EPOCH};

/// Mobile country code the backend serves (Canada)
pub const MCC_CODE: u16 = 302;

/// Whole hours since the Unix epoch at `at`
pub fn hours_since_epoch(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() / 3600
}

/// Message signed for a retrieval request
pub fn retrieve_message(period: u32, hour: u64) -> String {
    format!("{}:{}:{}", MCC_CODE, period, hour)
}

/// Hex-encoded HMAC-SHA256 of the retrieval message
pub fn sign_retrieve_request(key: &[u8], period: u32, at: SystemTime) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    let message = retrieve_message(period, hours_since_epoch(at));
    let tag = hmac::sign(&key, message.as_bytes());
    hex::encode(tag.as_ref())
}
