// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! App Root
//!
//! Mounts the app: resolves region content from the cache, builds the
//! backend for the selected region, assembles the [`AppContext`], and runs
//! the one-shot content sync after the first render.

mod accessibility;
mod context;
mod navigation;

pub use accessibility::{AccessibilitySettings, ACCESSIBILITY_KEY};
pub use context::{
    AppContext, AppContextBuilder, AppShell, NeedsAccessibility, NeedsExposureService,
    NeedsNavigation, NeedsRegion, SafeAreaInsets,
};
pub use navigation::{NavigationRoute, NavigationState, HOME_ROUTE, NAVIGATION_STATE_KEY};

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::{BackendError, BackendFactory, HttpBackendFactory, RegionContentSource};
use crate::config::{AppConfig, ConfigError};
use crate::content::{
    ContentSynchronizer, Generation, GenerationToken, RegionContent, SyncOutcome,
};
use crate::i18n::{Locale, LOCALE_KEY};
use crate::reporter::{Reporter, TracingReporter};
use crate::storage::{KeyValueStore, SqliteStore, StorageError, StorageService};
use crate::theme::{Theme, ThemeMode};

/// Unified error type for app root operations.
#[derive(Error, Debug)]
pub enum ShieldError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend could not be built.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Internal lock poisoned.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Collaborators the root is mounted with.
pub struct AppDependencies {
    pub store: Arc<dyn KeyValueStore>,
    pub reporter: Arc<dyn Reporter>,
    pub backend_factory: Arc<dyn BackendFactory>,
    pub safe_area: SafeAreaInsets,
    pub device_locale: Option<String>,
    pub theme_mode: ThemeMode,
}

impl AppDependencies {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        reporter: Arc<dyn Reporter>,
        backend_factory: Arc<dyn BackendFactory>,
    ) -> Self {
        Self {
            store,
            reporter,
            backend_factory,
            safe_area: SafeAreaInsets::default(),
            device_locale: None,
            theme_mode: ThemeMode::default(),
        }
    }

    /// SQLite store in the data directory, tracing reporter, HTTP backend.
    pub fn from_config(config: &AppConfig) -> Result<Self, ShieldError> {
        let store = SqliteStore::open(config.database_path())?;
        Ok(Self::new(
            Arc::new(store),
            Arc::new(TracingReporter::new()),
            Arc::new(HttpBackendFactory::new(config.clone())),
        ))
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_safe_area(mut self, safe_area: SafeAreaInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    pub fn with_device_locale(mut self, locale: &str) -> Self {
        self.device_locale = Some(locale.to_string());
        self
    }

    pub fn with_theme_mode(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }
}

/// The mounted app root.
pub struct AppRoot {
    config: AppConfig,
    storage: Arc<StorageService>,
    reporter: Arc<dyn Reporter>,
    backend_factory: Arc<dyn BackendFactory>,
    backend: watch::Sender<Arc<dyn RegionContentSource>>,
    synchronizer: ContentSynchronizer,
    generation: Generation,
    context: Arc<AppContext>,
    region_lock: Mutex<()>,
}

impl AppRoot {
    /// Mount the root. Reads storage but performs no network I/O.
    pub fn mount(config: AppConfig, deps: AppDependencies) -> Result<Self, ShieldError> {
        config.validate()?;

        let storage = Arc::new(StorageService::new(Arc::clone(&deps.store)));
        let region = storage.region();
        let backend = deps.backend_factory.create(region.as_deref())?;
        let (backend_tx, backend_rx) = watch::channel(backend);

        let synchronizer = ContentSynchronizer::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.reporter),
            config.fetch_timeout,
        );
        let initial = synchronizer.resolve_initial_content();
        deps.reporter.log_message(&format!(
            "mounted with region {:?}, active regions {:?}",
            region, initial.active
        ));

        let locale = storage
            .load_json::<Locale>(LOCALE_KEY)
            .or_else(|| deps.device_locale.as_deref().map(Locale::from_device))
            .unwrap_or_default();
        let accessibility = AccessibilitySettings::restore(&storage);
        let shell = AppShell::from_test_mode(config.test_mode);

        let context = AppContextBuilder::new(
            deps.safe_area,
            Arc::clone(&storage),
            Theme::for_mode(deps.theme_mode),
            locale,
        )
        .with_region(synchronizer.subscribe())
        .with_exposure_service(backend_rx)
        .with_restored_navigation()
        .build(accessibility, shell);

        Ok(Self {
            config,
            storage,
            reporter: deps.reporter,
            backend_factory: deps.backend_factory,
            backend: backend_tx,
            synchronizer,
            generation: Generation::new(),
            context: Arc::new(context),
            region_lock: Mutex::new(()),
        })
    }

    /// Context handed to screens
    pub fn context(&self) -> Arc<AppContext> {
        Arc::clone(&self.context)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<StorageService> {
        &self.storage
    }

    /// Currently active region content
    pub fn region_content(&self) -> Arc<RegionContent> {
        self.synchronizer.current()
    }

    /// Current generation; advances on every region change
    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// Run one sync attempt against the current backend.
    pub async fn sync(&self) -> SyncOutcome {
        let (token, backend) = {
            let _guard = self
                .region_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (self.generation.token(), self.backend.borrow().clone())
        };
        self.sync_against(token, backend).await
    }

    async fn sync_against(
        &self,
        token: GenerationToken,
        backend: Arc<dyn RegionContentSource>,
    ) -> SyncOutcome {
        let current = self.synchronizer.current();
        self.synchronizer
            .sync_with_backend(&current, backend.as_ref(), &token)
            .await
    }

    /// Run the post-mount sync in the background.
    pub fn spawn_initial_sync(self: &Arc<Self>) -> JoinHandle<SyncOutcome> {
        let root = Arc::clone(self);
        tokio::spawn(async move { root.sync().await })
    }

    /// Select a region.
    ///
    /// When the region changes, in-flight syncs are superseded, the backend
    /// is rebuilt for the new region and one sync runs against it. Returns
    /// `None` when the region is unchanged.
    pub async fn set_region(
        &self,
        region: Option<String>,
    ) -> Result<Option<SyncOutcome>, ShieldError> {
        let region = region.filter(|r| !r.is_empty());
        // Token and backend are taken together so the follow-up sync always
        // targets the region set here, even if another change lands first.
        let (token, backend) = {
            let _guard = self
                .region_lock
                .lock()
                .map_err(|_| ShieldError::Internal("region lock poisoned".into()))?;

            if self.storage.region() == region {
                return Ok(None);
            }

            let backend = self.backend_factory.create(region.as_deref())?;
            self.storage.set_region(region.clone())?;
            self.generation.advance();
            self.backend.send_replace(Arc::clone(&backend));
            (self.generation.token(), backend)
        };

        self.reporter
            .log_message(&format!("region changed to {:?}", region));
        Ok(Some(self.sync_against(token, backend).await))
    }

    /// Persist navigation state for the next launch.
    pub fn persist_navigation(&self, state: &NavigationState) -> Result<(), ShieldError> {
        state.persist(&self.storage)?;
        Ok(())
    }

    /// Persist the user's locale choice; applies from the next mount.
    pub fn persist_locale(&self, locale: Locale) -> Result<(), ShieldError> {
        self.storage.save_json(LOCALE_KEY, &locale)?;
        Ok(())
    }

    /// Persist accessibility settings; applies from the next mount.
    pub fn persist_accessibility(
        &self,
        settings: &AccessibilitySettings,
    ) -> Result<(), ShieldError> {
        settings.persist(&self.storage)?;
        Ok(())
    }
}
