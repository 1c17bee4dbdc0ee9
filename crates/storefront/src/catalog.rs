//! Item metadata lookup.
//!
//! Pages sometimes add an item by id alone and expect the name and price to
//! be found elsewhere. That lookup goes through [`ItemCatalog`] so the cart
//! never reaches into the page for it.

use highflight_core::ItemId;
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Display name and unit price of a purchasable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub price: Decimal,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Source of item metadata.
pub trait ItemCatalog {
    /// Look up an item by id.
    fn lookup(&self, id: &str) -> Option<CatalogEntry>;
}

/// Catalog held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: IndexMap<ItemId, CatalogEntry>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, id: impl Into<ItemId>, entry: CatalogEntry) {
        self.entries.insert(id.into(), entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &CatalogEntry)> {
        self.entries.iter()
    }
}

impl ItemCatalog for StaticCatalog {
    fn lookup(&self, id: &str) -> Option<CatalogEntry> {
        self.entries.get(id).cloned()
    }
}

impl<K: Into<ItemId>> FromIterator<(K, CatalogEntry)> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = (K, CatalogEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
