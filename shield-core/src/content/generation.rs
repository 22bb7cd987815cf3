// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generation counter for superseding in-flight sync attempts.
//!
//! Advancing the counter and committing under a token take the same lock,
//! so a commit either lands entirely before an advance or not at all.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared counter. Advancing it invalidates every token issued before.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<Mutex<u64>>,
}

fn lock(counter: &Mutex<u64>) -> MutexGuard<'_, u64> {
    counter.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Generation {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token for the current generation.
    pub fn token(&self) -> GenerationToken {
        GenerationToken {
            counter: Arc::clone(&self.counter),
            issued: self.current(),
        }
    }

    /// Moves to the next generation and returns it.
    ///
    /// Waits for any commit in progress under an older token.
    pub fn advance(&self) -> u64 {
        let mut counter = lock(&self.counter);
        *counter += 1;
        *counter
    }

    /// The current generation.
    pub fn current(&self) -> u64 {
        *lock(&self.counter)
    }
}

/// Snapshot of a [`Generation`] taken when an attempt starts.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    counter: Arc<Mutex<u64>>,
    issued: u64,
}

impl GenerationToken {
    /// True until the generation is advanced.
    pub fn is_current(&self) -> bool {
        *lock(&self.counter) == self.issued
    }

    /// Runs `commit` only if the token is still current.
    ///
    /// The generation cannot advance while `commit` runs. Returns `None`
    /// when the token was already superseded. `commit` must not advance
    /// the same generation.
    pub fn commit_if_current<T>(&self, commit: impl FnOnce() -> T) -> Option<T> {
        let counter = lock(&self.counter);
        if *counter != self.issued {
            return None;
        }
        let result = commit();
        drop(counter);
        Some(result)
    }

    /// The generation this token was issued for.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
