// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shield Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Mounts the shield-core app root and exposes a blocking API; calls that
//! reach the backend run on an internal tokio runtime and should be made
//! off the UI thread.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tokio::runtime::Runtime;

use shield_core::{
    fingerprint, AppDependencies, AppRoot, Locale, NavigationState, Reporter, ThemeMode,
    TracingReporter,
};

// === Modules ===

mod error;
mod types;

pub use error::MobileError;
pub use types::{
    MobileAccessibilitySettings, MobileAppConfig, MobileSafeAreaInsets, MobileSyncOutcome,
};

uniffi::setup_scaffolding!();

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install the process-wide log subscriber. Later calls do nothing.
///
/// Honors `RUST_LOG`; defaults to `shield=info`.
#[uniffi::export]
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shield=info"));
        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Callback interface implemented by the platform shell.
#[uniffi::export(callback_interface)]
pub trait AppInitListener: Send + Sync {
    /// Startup finished; hide the splash screen.
    fn on_splash_dismissed(&self);

    /// A sync replaced the active region content.
    fn on_region_content_changed(&self, active_regions: Vec<String>);
}

/// Main Shield interface for mobile platforms.
#[derive(uniffi::Object)]
pub struct ShieldApp {
    runtime: Runtime,
    root: Arc<AppRoot>,
    listener: Arc<dyn AppInitListener>,
}

impl ShieldApp {
    fn notify(&self, outcome: &MobileSyncOutcome) {
        notify_listener(self.listener.as_ref(), outcome);
    }
}

fn notify_listener(listener: &dyn AppInitListener, outcome: &MobileSyncOutcome) {
    if let MobileSyncOutcome::Updated { active_regions } = outcome {
        listener.on_region_content_changed(active_regions.clone());
    }
}

#[uniffi::export]
impl ShieldApp {
    /// Mount the app root with its database under `data_dir`.
    ///
    /// Performs no network I/O; call [`sync`](Self::sync) after the first
    /// frame is on screen.
    #[uniffi::constructor]
    pub fn new(
        data_dir: String,
        config: MobileAppConfig,
        listener: Box<dyn AppInitListener>,
    ) -> Result<Arc<Self>, MobileError> {
        let core_config = config.to_core_config(&data_dir)?;
        let listener: Arc<dyn AppInitListener> = Arc::from(listener);

        let splash_listener = Arc::clone(&listener);
        let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter::with_splash_hook(move || {
            splash_listener.on_splash_dismissed()
        }));

        let mut deps = AppDependencies::from_config(&core_config)?
            .with_reporter(reporter)
            .with_safe_area(config.safe_area.into())
            .with_theme_mode(if config.dark_mode {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            });
        if let Some(locale) = config.device_locale.as_deref() {
            deps = deps.with_device_locale(locale);
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("shield-sync")
            .enable_all()
            .build()
            .map_err(|e| MobileError::Internal(e.to_string()))?;

        let root = AppRoot::mount(core_config, deps)?;

        Ok(Arc::new(ShieldApp {
            runtime,
            root: Arc::new(root),
            listener,
        }))
    }

    /// Fetch the backend copy once and adopt it if it changed. Blocks.
    pub fn sync(&self) -> MobileSyncOutcome {
        let outcome: MobileSyncOutcome = self.runtime.block_on(self.root.sync()).into();
        self.notify(&outcome);
        outcome
    }

    /// Start the post-mount sync without waiting for it.
    ///
    /// The listener hears about the outcome.
    pub fn sync_in_background(&self) {
        let _guard = self.runtime.enter();
        let handle = self.root.spawn_initial_sync();
        let listener = Arc::clone(&self.listener);

        self.runtime.spawn(async move {
            match handle.await {
                Ok(outcome) => {
                    notify_listener(listener.as_ref(), &MobileSyncOutcome::from(outcome))
                }
                Err(e) => tracing::error!(target: "shield", error = %e, "background sync aborted"),
            }
        });
    }

    /// Select a region (empty or `None` clears it). Blocks while the
    /// follow-up sync runs.
    ///
    /// Returns `None` when the region did not change.
    pub fn set_region(
        &self,
        region: Option<String>,
    ) -> Result<Option<MobileSyncOutcome>, MobileError> {
        let outcome = self
            .runtime
            .block_on(self.root.set_region(region))?
            .map(MobileSyncOutcome::from);

        if let Some(outcome) = &outcome {
            self.notify(outcome);
        }
        Ok(outcome)
    }

    /// Selected region, if any
    pub fn region(&self) -> Option<String> {
        self.root.context().region()
    }

    /// Active region content as JSON
    pub fn region_content_json(&self) -> Result<String, MobileError> {
        Ok(self.root.region_content().to_json()?)
    }

    /// Regions where the app is active
    pub fn active_regions(&self) -> Vec<String> {
        self.root.context().active_regions()
    }

    /// Fingerprint of the active region content ("sha256:...")
    pub fn content_fingerprint(&self) -> Result<String, MobileError> {
        Ok(fingerprint(&self.root.region_content())?.to_string())
    }

    /// Localized text for a dotted id; unknown ids come back unchanged.
    pub fn translate(&self, id: String) -> String {
        self.root.context().translate(&id)
    }

    /// Whether the demo shell wraps the navigator
    pub fn is_demo_mode(&self) -> bool {
        self.root.context().shell().is_demo()
    }

    /// Locale code in use ("en" or "fr")
    pub fn locale(&self) -> String {
        self.root.context().locale().code().to_string()
    }

    /// Persist a locale choice; applies from the next launch.
    pub fn save_locale(&self, code: String) -> Result<(), MobileError> {
        let locale = Locale::from_code(&code)
            .ok_or_else(|| MobileError::InvalidInput(format!("unsupported locale: {}", code)))?;
        Ok(self.root.persist_locale(locale)?)
    }

    /// Navigation state restored at launch, as JSON
    pub fn navigation_state_json(&self) -> Result<String, MobileError> {
        Ok(serde_json::to_string(
            self.root.context().initial_navigation(),
        )?)
    }

    /// Persist navigation state for the next launch.
    pub fn save_navigation_state_json(&self, json: String) -> Result<(), MobileError> {
        let state: NavigationState = serde_json::from_str(&json)
            .map_err(|e| MobileError::InvalidInput(format!("navigation state: {}", e)))?;
        if state.current_route().is_none() {
            return Err(MobileError::InvalidInput(
                "navigation index out of range".to_string(),
            ));
        }
        Ok(self.root.persist_navigation(&state)?)
    }

    pub fn accessibility_settings(&self) -> MobileAccessibilitySettings {
        self.root.context().accessibility().into()
    }

    /// Persist accessibility settings; applies from the next launch.
    pub fn save_accessibility_settings(
        &self,
        settings: MobileAccessibilitySettings,
    ) -> Result<(), MobileError> {
        Ok(self.root.persist_accessibility(&settings.into())?)
    }
}
