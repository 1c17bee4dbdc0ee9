//! Page state owned by a single page controller.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::compare::CompareList;
use crate::config::StoreConfig;
use crate::favorites::FavoritesStore;
use crate::notify::Notifier;
use crate::preferences::Preferences;
use crate::storage::KeyValueStore;

/// Every store a page works with, restored together at page load.
///
/// Controllers on different pages each build their own `PageState`; they
/// see each other's changes only through the shared key-value store.
#[derive(Debug)]
pub struct PageState {
    config: StoreConfig,
    cart: CartStore,
    favorites: FavoritesStore,
    compare: CompareList,
    preferences: Preferences,
}

impl PageState {
    /// Restore all stores from `storage`.
    ///
    /// # Arguments
    ///
    /// * `config` - Key namespace, pricing and limits
    /// * `storage` - Backend shared by every store on the page
    /// * `notifier` - Optional receiver for notices and cart changes
    #[must_use]
    pub fn open(
        config: StoreConfig,
        storage: Arc<dyn KeyValueStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let keys = &config.keys;
        let mut cart = CartStore::restore(storage.clone(), keys.clone(), config.pricing);
        let mut favorites = FavoritesStore::restore(storage.clone(), keys.favorites());
        let mut compare = CompareList::restore(storage.clone(), keys.compare(), config.compare_limit);
        let preferences = Preferences::new(storage, keys.theme());

        if let Some(notifier) = notifier {
            cart = cart.with_notifier(notifier.clone());
            favorites = favorites.with_notifier(notifier.clone());
            compare = compare.with_notifier(notifier);
        }

        tracing::debug!(
            namespace = config.keys.namespace(),
            cart_lines = cart.len(),
            favorites = favorites.len(),
            "Page state restored"
        );

        Self {
            config,
            cart,
            favorites,
            compare,
            preferences,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub const fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    #[must_use]
    pub const fn compare(&self) -> &CompareList {
        &self.compare
    }

    pub const fn compare_mut(&mut self) -> &mut CompareList {
        &mut self.compare
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::notify::NoticeQueue;
    use crate::storage::{MemoryStore, StorageKeys};

    #[test]
    fn test_reopen_sees_persisted_state() {
        let storage = Arc::new(MemoryStore::new());
        {
            let mut page = PageState::open(StoreConfig::default(), storage.clone(), None);
            page.cart_mut().add_item("pizza", "Pizza", Decimal::TEN).unwrap();
            page.favorites_mut().toggle("pizza");
            page.compare_mut().toggle("hotel-ritz");
        }

        let page = PageState::open(StoreConfig::default(), storage, None);
        assert_eq!(page.cart().item_count(), 1);
        assert!(page.favorites().contains("pizza"));
        assert!(page.compare().contains("hotel-ritz"));
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let storage = Arc::new(MemoryStore::new());
        let menu = StoreConfig {
            keys: StorageKeys::new("menu"),
            ..StoreConfig::default()
        };
        let mut page = PageState::open(menu, storage.clone(), None);
        page.cart_mut().add_item("a", "A", Decimal::ONE).unwrap();

        let other = PageState::open(StoreConfig::default(), storage, None);
        assert!(other.cart().is_empty());
    }

    #[test]
    fn test_notifier_is_shared() {
        let queue = Arc::new(NoticeQueue::new());
        let mut page = PageState::open(
            StoreConfig::default(),
            Arc::new(MemoryStore::new()),
            Some(queue.clone()),
        );

        page.cart_mut().add_item("a", "A", Decimal::ONE).unwrap();
        page.favorites_mut().toggle("a");
        assert_eq!(queue.drain().len(), 2);
    }
}
