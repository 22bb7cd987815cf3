// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for region content resolution and sync
//!
//! Run with: cargo test --test content

mod fingerprint_tests;
mod resolve_tests;
mod support;
mod sync_tests;
