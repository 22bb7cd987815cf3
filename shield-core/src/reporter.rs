// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reporter
//!
//! Logging and splash-screen side effects, injected instead of called as
//! globals. Reporters are fire-and-forget: they never fail or panic.

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Message logged when the app finishes its startup attempt.
pub const APP_INIT_MESSAGE: &str = "App.appInit()";

/// Sink for log events and the splash-screen dismissal signal.
pub trait Reporter: Send + Sync {
    /// Record an informational message.
    fn log_message(&self, message: &str);

    /// Record a failure together with its error.
    fn log_exception(&self, message: &str, error: &dyn Error);

    /// Hide the splash screen.
    fn dismiss_splash(&self);

    /// Startup finished (successfully or not).
    fn app_initialized(&self) {
        self.log_message(APP_INIT_MESSAGE);
        self.dismiss_splash();
    }
}

type SplashHook = Box<dyn Fn() + Send + Sync>;

/// Reporter backed by `tracing`.
///
/// Splash dismissal is forwarded to a platform hook when one is set.
#[derive(Default)]
pub struct TracingReporter {
    splash_hook: Option<SplashHook>,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `hook` when the splash screen should be hidden.
    pub fn with_splash_hook(hook: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            splash_hook: Some(Box::new(hook)),
        }
    }
}

impl Reporter for TracingReporter {
    fn log_message(&self, message: &str) {
        tracing::info!(target: "shield", "{}", message);
    }

    fn log_exception(&self, message: &str, error: &dyn Error) {
        tracing::error!(target: "shield", error = %error, "{}", message);
    }

    fn dismiss_splash(&self) {
        tracing::debug!(target: "shield", "dismissing splash screen");
        if let Some(hook) = &self.splash_hook {
            hook();
        }
    }
}

/// Reporter that records every call, for tests and diagnostics screens.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
    exceptions: Mutex<Vec<String>>,
    splash_dismissals: AtomicUsize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Exceptions logged so far, as "message: error"
    pub fn exceptions(&self) -> Vec<String> {
        self.exceptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions().len()
    }

    pub fn splash_dismissals(&self) -> usize {
        self.splash_dismissals.load(Ordering::SeqCst)
    }

    /// How many times the app-initialized signal was emitted
    pub fn app_initialized_count(&self) -> usize {
        self.messages()
            .iter()
            .filter(|m| m.as_str() == APP_INIT_MESSAGE)
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn log_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn log_exception(&self, message: &str, error: &dyn Error) {
        self.exceptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{}: {}", message, error));
    }

    fn dismiss_splash(&self) {
        self.splash_dismissals.fetch_add(1, Ordering::SeqCst);
    }
}
