// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shield Core Library
//!
//! Root composition for the Shield exposure-notification app.
//! Resolves regional content (cache → bundled), keeps it in sync with the
//! backend, and exposes everything screens need through one typed context.

pub mod app;
pub mod backend;
pub mod config;
pub mod content;
pub mod i18n;
pub mod reporter;
pub mod storage;
pub mod theme;

pub use app::{
    AccessibilitySettings, AppContext, AppContextBuilder, AppDependencies, AppRoot, AppShell,
    NavigationRoute, NavigationState, SafeAreaInsets, ShieldError,
};
pub use backend::{
    BackendClient, BackendError, BackendFactory, HttpBackendFactory, MockContentSource,
    RegionContentSource,
};
pub use config::{AppConfig, ConfigError};
pub use content::{
    bundled_region_content, canonical_json, fingerprint, ContentError, ContentFingerprint,
    ContentSynchronizer, Generation, GenerationToken, RegionContent, SyncOutcome,
    REGION_CONTENT_KEY,
};
pub use i18n::Locale;
pub use reporter::{RecordingReporter, Reporter, TracingReporter};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageService};
pub use theme::{Theme, ThemeError, ThemeMode};
