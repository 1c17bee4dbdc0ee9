//! Visitor preferences persisted alongside the cart.

use std::sync::Arc;

use highflight_core::Theme;

use crate::storage::{self, KeyValueStore};

/// Theme preference store.
pub struct Preferences {
    key: String,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Preferences {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, theme_key: impl Into<String>) -> Self {
        Self {
            key: theme_key.into(),
            storage,
        }
    }

    /// The saved theme, `Light` when nothing valid is stored.
    #[must_use]
    pub fn theme(&self) -> Theme {
        let Some(raw) = storage::load_raw(self.storage.as_ref(), &self.key) else {
            return Theme::default();
        };
        raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "Ignoring unknown theme preference");
            Theme::default()
        })
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.storage.set(&self.key, &theme.to_string()) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist theme");
        }
    }

    /// Switch to the other theme and return it.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }
}
