// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! App context
//!
//! Everything a screen can read, gathered in one value built once at the
//! root. The builder is staged: region content has to be supplied before
//! the backend capability, and both before navigation state, so that
//! restored screens never observe an incomplete context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::accessibility::AccessibilitySettings;
use super::navigation::NavigationState;
use crate::backend::RegionContentSource;
use crate::content::RegionContent;
use crate::i18n::Locale;
use crate::storage::StorageService;
use crate::theme::Theme;

/// Screen insets reserved by notches, status and home bars (points)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Which shell wraps the main navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppShell {
    /// Guided walkthrough shell with test controls
    Demo,
    /// Regular app
    Live,
}

impl AppShell {
    pub fn from_test_mode(test_mode: bool) -> Self {
        if test_mode {
            AppShell::Demo
        } else {
            AppShell::Live
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, AppShell::Demo)
    }
}

/// Context shared with every screen.
///
/// Screens only read from it; region content and the backend change
/// through the app root, which republishes them on their channels.
pub struct AppContext {
    safe_area: SafeAreaInsets,
    storage: Arc<StorageService>,
    theme: Theme,
    locale: Locale,
    region_content: watch::Receiver<Arc<RegionContent>>,
    backend: watch::Receiver<Arc<dyn RegionContentSource>>,
    navigation: NavigationState,
    accessibility: AccessibilitySettings,
    shell: AppShell,
}

impl AppContext {
    pub fn safe_area(&self) -> SafeAreaInsets {
        self.safe_area
    }

    pub fn storage(&self) -> &Arc<StorageService> {
        &self.storage
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Active region selected by the user
    pub fn region(&self) -> Option<String> {
        self.storage.region()
    }

    /// Latest published region content
    pub fn region_content(&self) -> Arc<RegionContent> {
        self.region_content.borrow().clone()
    }

    /// Receiver notified whenever region content is republished
    pub fn subscribe_region_content(&self) -> watch::Receiver<Arc<RegionContent>> {
        self.region_content.clone()
    }

    /// Regions where the app is active, per the latest content
    pub fn active_regions(&self) -> Vec<String> {
        self.region_content()
            .active_regions()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Text for `id` (a dotted path) in the current locale.
    ///
    /// Unknown ids are returned unchanged.
    pub fn translate(&self, id: &str) -> String {
        self.region_content()
            .text(self.locale, id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Backend capability for the active region
    pub fn backend(&self) -> Arc<dyn RegionContentSource> {
        self.backend.borrow().clone()
    }

    /// Navigation state restored at startup
    pub fn initial_navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn accessibility(&self) -> AccessibilitySettings {
        self.accessibility
    }

    pub fn shell(&self) -> AppShell {
        self.shell
    }
}

/// Scopes available before region content is resolved
struct BaseScope {
    safe_area: SafeAreaInsets,
    storage: Arc<StorageService>,
    theme: Theme,
    locale: Locale,
}

/// Builder stage: waiting for region content
pub struct NeedsRegion;

/// Builder stage: waiting for the backend capability
pub struct NeedsExposureService {
    region_content: watch::Receiver<Arc<RegionContent>>,
}

/// Builder stage: waiting for restored navigation state
pub struct NeedsNavigation {
    region_content: watch::Receiver<Arc<RegionContent>>,
    backend: watch::Receiver<Arc<dyn RegionContentSource>>,
}

/// Builder stage: waiting for accessibility settings and the shell
pub struct NeedsAccessibility {
    region_content: watch::Receiver<Arc<RegionContent>>,
    backend: watch::Receiver<Arc<dyn RegionContentSource>>,
    navigation: NavigationState,
}

/// Staged builder for [`AppContext`]
pub struct AppContextBuilder<Stage> {
    base: BaseScope,
    stage: Stage,
}

impl AppContextBuilder<NeedsRegion> {
    pub fn new(
        safe_area: SafeAreaInsets,
        storage: Arc<StorageService>,
        theme: Theme,
        locale: Locale,
    ) -> Self {
        Self {
            base: BaseScope {
                safe_area,
                storage,
                theme,
                locale,
            },
            stage: NeedsRegion,
        }
    }

    pub fn with_region(
        self,
        region_content: watch::Receiver<Arc<RegionContent>>,
    ) -> AppContextBuilder<NeedsExposureService> {
        AppContextBuilder {
            base: self.base,
            stage: NeedsExposureService { region_content },
        }
    }
}

impl AppContextBuilder<NeedsExposureService> {
    pub fn with_exposure_service(
        self,
        backend: watch::Receiver<Arc<dyn RegionContentSource>>,
    ) -> AppContextBuilder<NeedsNavigation> {
        AppContextBuilder {
            base: self.base,
            stage: NeedsNavigation {
                region_content: self.stage.region_content,
                backend,
            },
        }
    }
}

impl AppContextBuilder<NeedsNavigation> {
    /// Restore navigation state from storage
    pub fn with_restored_navigation(self) -> AppContextBuilder<NeedsAccessibility> {
        let navigation = NavigationState::restore(&self.base.storage);
        self.with_navigation(navigation)
    }

    pub fn with_navigation(
        self,
        navigation: NavigationState,
    ) -> AppContextBuilder<NeedsAccessibility> {
        AppContextBuilder {
            base: self.base,
            stage: NeedsAccessibility {
                region_content: self.stage.region_content,
                backend: self.stage.backend,
                navigation,
            },
        }
    }
}

impl AppContextBuilder<NeedsAccessibility> {
    pub fn build(self, accessibility: AccessibilitySettings, shell: AppShell) -> AppContext {
        AppContext {
            safe_area: self.base.safe_area,
            storage: self.base.storage,
            theme: self.base.theme,
            locale: self.base.locale,
            region_content: self.stage.region_content,
            backend: self.stage.backend,
            navigation: self.stage.navigation,
            accessibility,
            shell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockContentSource;
    use crate::storage::MemoryStore;

    fn context(content: RegionContent, locale: Locale) -> AppContext {
        let storage = Arc::new(StorageService::new(Arc::new(MemoryStore::new())));
        let (_content_tx, content_rx) = watch::channel(Arc::new(content));
        let backend: Arc<dyn RegionContentSource> =
            Arc::new(MockContentSource::returning(RegionContent::none()));
        let (_backend_tx, backend_rx) = watch::channel(backend);

        AppContextBuilder::new(SafeAreaInsets::default(), storage, Theme::default(), locale)
            .with_region(content_rx)
            .with_exposure_service(backend_rx)
            .with_restored_navigation()
            .build(AccessibilitySettings::default(), AppShell::Live)
    }

    #[test]
    fn test_translate_uses_locale_section() {
        let content = RegionContent::from_json(
            r#"{"Active":["ON"],"en":{"Home":{"Title":"Hello"}},"fr":{"Home":{"Title":"Bonjour"}}}"#,
        )
        .unwrap();

        assert_eq!(context(content.clone(), Locale::English).translate("Home.Title"), "Hello");
        assert_eq!(context(content, Locale::French).translate("Home.Title"), "Bonjour");
    }

    #[test]
    fn test_translate_unknown_id_is_identity() {
        let ctx = context(RegionContent::none(), Locale::English);
        assert_eq!(ctx.translate("Missing.Key"), "Missing.Key");
    }

    #[test]
    fn test_active_regions_skip_none_marker() {
        let ctx = context(RegionContent::none(), Locale::English);
        assert!(ctx.active_regions().is_empty());
        assert_eq!(ctx.initial_navigation(), &NavigationState::default());
    }

    #[test]
    fn test_shell_from_test_mode() {
        assert!(AppShell::from_test_mode(true).is_demo());
        assert!(!AppShell::from_test_mode(false).is_demo());
    }
}
