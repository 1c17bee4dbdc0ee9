//! Favorites store.
//!
//! A set of bookmarked item ids, persisted as a JSON array of strings in
//! insertion order after every change.

use std::sync::Arc;

use highflight_core::ItemId;
use indexmap::IndexSet;

use crate::notify::{Notice, Notifier};
use crate::storage::{self, KeyValueStore};

/// Favorites owned by a page controller.
pub struct FavoritesStore {
    ids: IndexSet<ItemId>,
    key: String,
    storage: Arc<dyn KeyValueStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Restore favorites persisted under `key`.
    ///
    /// Missing or malformed data yields an empty set; the latter is logged.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids: IndexSet<ItemId> = storage::load_json::<Vec<ItemId>>(storage.as_ref(), &key)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default();

        tracing::debug!(key = %key, count = ids.len(), "Restored favorites");

        Self {
            ids,
            key,
            storage,
            notifier: None,
        }
    }

    /// Attach a notifier called after every toggle.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Flip membership of `id`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(ItemId::from(id));
            true
        };

        self.persist();
        if let Some(notifier) = &self.notifier {
            let notice = if now_favorite {
                Notice::success("Added to favorites")
            } else {
                Notice::info("Removed from favorites")
            };
            notifier.notify(&notice);
        }
        now_favorite
    }

    /// Mark `id` as a favorite. Returns `false` if it already was.
    pub fn add(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(ItemId::from(id));
        self.persist();
        true
    }

    /// Unmark `id`. Returns `false` if it was not a favorite.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.ids.shift_remove(id) {
            return false;
        }
        self.persist();
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    /// Favorites in the order they were added.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &ItemId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        let ids: Vec<&ItemId> = self.ids.iter().collect();
        storage::save_json(self.storage.as_ref(), &self.key, &ids);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    const KEY: &str = "highflight-favorites";

    fn store_with(raw: Option<&str>) -> (Arc<MemoryStore>, FavoritesStore) {
        let storage = Arc::new(match raw {
            Some(raw) => MemoryStore::with_entries([(KEY, raw)]),
            None => MemoryStore::new(),
        });
        let favorites = FavoritesStore::restore(storage.clone(), KEY);
        (storage, favorites)
    }

    #[test]
    fn test_restore_array() {
        let (_, favorites) = store_with(Some(r#"["x","y"]"#));
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("x"));
        assert!(favorites.contains("y"));
    }

    #[test]
    fn test_restore_malformed_is_empty() {
        let (_, favorites) = store_with(Some("{not json"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_restore_deduplicates() {
        let (_, favorites) = store_with(Some(r#"["x","x","y"]"#));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_toggle_returns_new_state() {
        let (_, mut favorites) = store_with(None);
        assert!(favorites.toggle("hotel-1"));
        assert!(favorites.contains("hotel-1"));
        assert!(!favorites.toggle("hotel-1"));
        assert!(!favorites.contains("hotel-1"));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (_, mut favorites) = store_with(Some(r#"["a"]"#));
        favorites.toggle("a");
        favorites.toggle("a");
        assert!(favorites.contains("a"));
        favorites.toggle("b");
        favorites.toggle("b");
        assert!(!favorites.contains("b"));
    }

    #[test]
    fn test_add_remove_are_idempotent() {
        let (_, mut favorites) = store_with(None);
        assert!(favorites.add("a"));
        assert!(!favorites.add("a"));
        assert!(favorites.remove("a"));
        assert!(!favorites.remove("a"));
    }

    #[test]
    fn test_persists_in_insertion_order() {
        let (storage, mut favorites) = store_with(None);
        favorites.toggle("b");
        favorites.toggle("a");
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some(r#"["b","a"]"#));

        favorites.clear();
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    proptest! {
        #[test]
        fn test_toggle_is_self_inverse(
            initial in prop::collection::vec("[a-d]", 0..6),
            id in "[a-e]",
        ) {
            let (storage, mut favorites) = store_with(None);
            for existing in &initial {
                favorites.add(existing);
            }
            let mut before: Vec<String> = favorites.ids().map(|i| i.as_str().to_owned()).collect();

            let added = favorites.toggle(&id);
            prop_assert_eq!(added, favorites.contains(&id));
            prop_assert_eq!(added, !before.contains(&id));
            favorites.toggle(&id);

            let mut after: Vec<String> = favorites.ids().map(|i| i.as_str().to_owned()).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(&after, &before);

            let restored = FavoritesStore::restore(storage, KEY);
            let mut persisted: Vec<String> = restored.ids().map(|i| i.as_str().to_owned()).collect();
            persisted.sort();
            prop_assert_eq!(persisted, after);
        }
    }
}
