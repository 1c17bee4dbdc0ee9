//! Hotel comparison list: a small bounded selection of ids.

use std::sync::Arc;

use highflight_core::ItemId;
use indexmap::IndexSet;

use crate::notify::{Notice, Notifier};
use crate::storage::{self, KeyValueStore};

/// Default number of hotels that can be compared side by side.
pub const DEFAULT_COMPARE_LIMIT: usize = 3;

/// Outcome of [`CompareList::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareToggle {
    Added,
    Removed,
    /// The list is at its limit; nothing changed.
    Full,
}

/// Derive a comparison id from a hotel title.
///
/// Lower-cases the title and replaces every character outside `[a-z0-9]`
/// with `-`, one for one.
#[must_use]
pub fn compare_id_from_title(title: &str) -> ItemId {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .into()
}

pub struct CompareList {
    ids: IndexSet<ItemId>,
    limit: usize,
    key: String,
    storage: Arc<dyn KeyValueStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for CompareList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareList")
            .field("ids", &self.ids)
            .field("limit", &self.limit)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CompareList {
    /// Restore the list persisted under `key`, truncated to `limit`.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>, key: impl Into<String>, limit: usize) -> Self {
        let key = key.into();
        let ids: IndexSet<ItemId> = storage::load_json::<Vec<ItemId>>(storage.as_ref(), &key)
            .map(|ids| ids.into_iter().take(limit).collect())
            .unwrap_or_default();

        Self {
            ids,
            limit,
            key,
            storage,
            notifier: None,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Add `id` if absent and there is room, remove it if present.
    pub fn toggle(&mut self, id: &str) -> CompareToggle {
        let outcome = if self.ids.shift_remove(id) {
            CompareToggle::Removed
        } else if self.ids.len() >= self.limit {
            self.emit(&Notice::warning(format!(
                "At most {} hotels can be compared",
                self.limit
            )));
            return CompareToggle::Full;
        } else {
            self.ids.insert(ItemId::from(id));
            CompareToggle::Added
        };

        let ids: Vec<&ItemId> = self.ids.iter().collect();
        storage::save_json(self.storage.as_ref(), &self.key, &ids);

        match outcome {
            CompareToggle::Added => self.emit(&Notice::success(format!("{id} added to comparison"))),
            CompareToggle::Removed => self.emit(&Notice::info("Hotel removed from comparison")),
            CompareToggle::Full => {}
        }
        outcome
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &ItemId> {
        self.ids.iter()
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        storage::save_json(self.storage.as_ref(), &self.key, &[] as &[ItemId]);
    }

    fn emit(&self, notice: &Notice) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(notice);
        }
    }
}
