// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted navigation state

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{StorageError, StorageService};

/// Storage key navigation state is persisted under
pub const NAVIGATION_STATE_KEY: &str = "navigationState";

/// Route every fresh stack starts on
pub const HOME_ROUTE: &str = "Home";

/// One entry in the navigation stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRoute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl NavigationRoute {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: None,
        }
    }
}

/// Navigation stack with the focused index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub index: usize,
    pub routes: Vec<NavigationRoute>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            index: 0,
            routes: vec![NavigationRoute::new(HOME_ROUTE)],
        }
    }
}

impl NavigationState {
    /// Restore the persisted stack.
    ///
    /// Missing, malformed or inconsistent state yields a fresh stack.
    pub fn restore(storage: &StorageService) -> Self {
        storage
            .load_json::<NavigationState>(NAVIGATION_STATE_KEY)
            .filter(NavigationState::is_valid)
            .unwrap_or_default()
    }

    /// Persist the stack for the next launch.
    pub fn persist(&self, storage: &StorageService) -> Result<(), StorageError> {
        storage.save_json(NAVIGATION_STATE_KEY, self)
    }

    fn is_valid(&self) -> bool {
        self.index < self.routes.len()
    }

    /// The focused route
    pub fn current_route(&self) -> Option<&NavigationRoute> {
        self.routes.get(self.index)
    }

    /// Push a route and focus it. Routes above the focused one are dropped.
    pub fn push(&mut self, route: NavigationRoute) {
        self.routes.truncate(self.index + 1);
        self.routes.push(route);
        self.index = self.routes.len() - 1;
    }

    /// Pop the focused route. The root route is never popped.
    pub fn pop(&mut self) -> Option<NavigationRoute> {
        if self.index == 0 {
            return None;
        }
        self.routes.truncate(self.index + 1);
        let popped = self.routes.pop();
        self.index -= 1;
        popped
    }
}
