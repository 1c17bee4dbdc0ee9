//! Shopping cart store.
//!
//! The cart owns an insertion-ordered set of line items keyed by item id and
//! derives its totals fresh on every read. Every mutation is persisted to the
//! page's key-value store and then reported to the notifier, if one is set.
//!
//! # Persisted format
//!
//! The cart is written as a JSON array of `{id, name, price, quantity}` with
//! `price` as a JSON number, written with every digit of the decimal so a
//! restore gives back exactly what was stored. Older pages wrapped the array as
//! `{"items": [...], "total": n}`; that shape is still accepted on restore.

use std::sync::Arc;

use highflight_core::{CurrencyCode, ItemId, Price};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::ItemCatalog;
use crate::error::{CartError, Result};
use crate::notify::{Notice, Notifier};
use crate::order::{OrderRecord, generate_order_number};
use crate::storage::{self, KeyValueStore, StorageKeys};

// =============================================================================
// Line Items & Totals
// =============================================================================

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity, or `None` if the product does not fit in
    /// a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Derived amounts for the current cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub service: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

impl CartTotals {
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        service: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Display strings for each amount (e.g. `"$18.75"`).
    #[must_use]
    pub fn formatted(&self, currency: CurrencyCode) -> FormattedTotals {
        let fmt = |amount| Price::new(amount, currency).display();
        FormattedTotals {
            subtotal: fmt(self.subtotal),
            service: fmt(self.service),
            tax: fmt(self.tax),
            total: fmt(self.total),
        }
    }
}

/// Totals rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub service: String,
    pub tax: String,
    pub total: String,
}

/// Service charge and tax applied on top of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    service_charge: Decimal,
    tax_rate: Decimal,
}

impl Pricing {
    /// # Errors
    ///
    /// Returns `CartError::InvalidServiceCharge` for a negative charge and
    /// `CartError::InvalidTaxRate` for a rate outside `[0, 1]`.
    pub fn new(service_charge: Decimal, tax_rate: Decimal) -> Result<Self> {
        if service_charge < Decimal::ZERO {
            return Err(CartError::InvalidServiceCharge(service_charge));
        }
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(CartError::InvalidTaxRate(tax_rate));
        }
        Ok(Self {
            service_charge,
            tax_rate,
        })
    }

    #[must_use]
    pub const fn service_charge(&self) -> Decimal {
        self.service_charge
    }

    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Totals for `items`, or `None` if any amount overflows a `Decimal`.
    ///
    /// An empty cart totals zero: the flat service charge only applies once
    /// there is something to serve.
    #[must_use]
    pub fn totals<'a>(
        &self,
        items: impl IntoIterator<Item = &'a LineItem>,
    ) -> Option<CartTotals> {
        let mut any = false;
        let mut subtotal = Decimal::ZERO;
        for item in items {
            any = true;
            subtotal = subtotal.checked_add(item.line_total()?)?;
        }

        if !any {
            return Some(CartTotals::ZERO);
        }

        let tax = subtotal.checked_mul(self.tax_rate)?;
        let total = subtotal
            .checked_add(self.service_charge)?
            .checked_add(tax)?;
        Some(CartTotals {
            subtotal,
            service: self.service_charge,
            tax,
            total,
        })
    }
}

impl Default for Pricing {
    /// $5.00 service, 10% tax.
    fn default() -> Self {
        Self {
            service_charge: Decimal::new(500, 2),
            tax_rate: Decimal::new(10, 2),
        }
    }
}

/// Read-only view of the cart handed to the render adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub item_count: u64,
}

// =============================================================================
// Serialization
// =============================================================================

/// The older `{"items": [...], "total": n}` cart shape.
#[derive(Deserialize)]
struct WrappedCart {
    items: Vec<LineItem>,
}

/// Encode line items in the persisted cart format.
///
/// # Errors
///
/// Returns an error if a price cannot be represented as a JSON number.
pub fn encode_items(items: &[LineItem]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Decode a persisted cart, accepting both the bare array and the older
/// `{"items": [...]}` wrapper.
///
/// # Errors
///
/// Returns an error if `json` matches neither shape.
pub fn decode_items(json: &str) -> serde_json::Result<Vec<LineItem>> {
    // Shape is picked up front: buffering the input for an untagged enum
    // would turn exact JSON numbers into maps and break `quantity`.
    if json.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedCart>(json).map(|cart| cart.items)
    } else {
        serde_json::from_str(json)
    }
}

/// Rebuild the keyed item map from decoded lines, enforcing the cart
/// invariants: one line per id, positive quantities, non-negative prices and
/// totals that fit in a `Decimal`.
fn index_items(lines: Vec<LineItem>, pricing: Pricing) -> IndexMap<ItemId, LineItem> {
    let mut items: IndexMap<ItemId, LineItem> = IndexMap::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 || line.price < Decimal::ZERO {
            tracing::warn!(id = %line.id, "Dropping invalid persisted cart line");
            continue;
        }
        let candidate = match items.get(&line.id) {
            Some(existing) => LineItem {
                quantity: existing.quantity.saturating_add(line.quantity),
                ..existing.clone()
            },
            None => line,
        };
        if !totals_fit(&items, pricing, &candidate) {
            tracing::warn!(id = %candidate.id, "Dropping persisted cart line whose total overflows");
            continue;
        }
        // Replacing an existing key keeps its position.
        items.insert(candidate.id.clone(), candidate);
    }
    items
}

/// Whether the totals stay representable once `candidate` replaces the line
/// with the same id (or is appended).
fn totals_fit(items: &IndexMap<ItemId, LineItem>, pricing: Pricing, candidate: &LineItem) -> bool {
    let others = items.values().filter(|item| item.id != candidate.id);
    pricing
        .totals(others.chain(std::iter::once(candidate)))
        .is_some()
}

// =============================================================================
// Cart Store
// =============================================================================

/// Cart owned by a page controller.
pub struct CartStore {
    items: IndexMap<ItemId, LineItem>,
    pricing: Pricing,
    keys: StorageKeys,
    storage: Arc<dyn KeyValueStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("pricing", &self.pricing)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart persisted under `keys.cart()`.
    ///
    /// Missing or malformed data yields an empty cart; the latter is logged.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>, keys: StorageKeys, pricing: Pricing) -> Self {
        let key = keys.cart();
        let items = match storage::load_raw(storage.as_ref(), &key) {
            Some(raw) => match decode_items(&raw) {
                Ok(lines) => index_items(lines, pricing),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding malformed persisted cart");
                    IndexMap::new()
                }
            },
            None => IndexMap::new(),
        };

        tracing::debug!(key = %key, lines = items.len(), "Restored cart");

        Self {
            items,
            pricing,
            keys,
            storage,
            notifier: None,
        }
    }

    /// Attach a notifier called after every mutation.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub const fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Add one unit of an item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidPrice` if `unit_price` is negative.
    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Decimal,
    ) -> Result<()> {
        self.add_item_with_quantity(id, name, unit_price, 1)
    }

    /// Add `quantity` units of an item.
    ///
    /// If the id is already in the cart its quantity is increased; the price
    /// and name seen first are kept.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidPrice` if `unit_price` is negative,
    /// `CartError::InvalidQuantity` if `quantity` is zero and
    /// `CartError::AmountOverflow` if the cart total would overflow.
    pub fn add_item_with_quantity(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(CartError::InvalidPrice(unit_price));
        }
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let id = id.into();
        let candidate = match self.items.get(&id) {
            Some(existing) => LineItem {
                quantity: existing.quantity.saturating_add(quantity),
                ..existing.clone()
            },
            None => LineItem {
                id: id.clone(),
                name: name.into(),
                price: unit_price,
                quantity,
            },
        };
        if !totals_fit(&self.items, self.pricing, &candidate) {
            return Err(CartError::AmountOverflow);
        }

        let name = candidate.name.clone();
        self.items.insert(id.clone(), candidate);

        tracing::debug!(%id, quantity, "Added to cart");
        self.commit();
        self.emit(&Notice::success(format!("{name} added to cart")));
        Ok(())
    }

    /// Add an item whose name and price come from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownItem` if the catalog has no such id, plus
    /// the errors of [`Self::add_item_with_quantity`].
    pub fn add_from_catalog(
        &mut self,
        catalog: &dyn ItemCatalog,
        id: &str,
        quantity: u32,
    ) -> Result<()> {
        let entry = catalog
            .lookup(id)
            .ok_or_else(|| CartError::UnknownItem(ItemId::from(id)))?;
        self.add_item_with_quantity(id, entry.name, entry.price, quantity)
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        if self.items.shift_remove(id).is_none() {
            return;
        }
        tracing::debug!(id, "Removed from cart");
        self.commit();
        self.emit(&Notice::info("Item removed from cart"));
    }

    /// Set an item's quantity. Zero or below removes it; unknown ids are
    /// ignored. A quantity that would overflow the cart total leaves the line
    /// unchanged and emits a warning notice.
    pub fn update_quantity(&mut self, id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let Some(existing) = self.items.get(id) else {
            return;
        };
        let candidate = LineItem {
            quantity: u32::try_from(new_quantity).unwrap_or(u32::MAX),
            ..existing.clone()
        };
        if !totals_fit(&self.items, self.pricing, &candidate) {
            tracing::warn!(id, quantity = new_quantity, "Rejected quantity: cart total overflows");
            self.emit(&Notice::warning("Quantity is too large"));
            return;
        }

        tracing::debug!(id, quantity = candidate.quantity, "Updated cart quantity");
        self.items.insert(candidate.id.clone(), candidate);
        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
        self.emit(&Notice::info("Cart cleared"));
    }

    /// Totals for the current contents. Pure and idempotent.
    #[must_use]
    pub fn calculate_totals(&self) -> CartTotals {
        // Every add, update and restore checks that the totals fit, so the
        // fallback is never taken.
        self.pricing
            .totals(self.items.values())
            .unwrap_or(CartTotals::ZERO)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .values()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.get(id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &LineItem> {
        self.items.values()
    }

    /// Everything the render adapter needs to draw the cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.values().cloned().collect(),
            totals: self.calculate_totals(),
            item_count: self.item_count(),
        }
    }

    /// The cart in its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be represented as a JSON number.
    pub fn to_json(&self) -> serde_json::Result<String> {
        encode_items(&self.snapshot().items)
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Confirm the current cart as an order.
    ///
    /// The order is persisted as the last order and the cart is cleared.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` if there is nothing to order.
    #[instrument(skip(self), fields(lines = self.items.len()))]
    pub fn confirm_order(&mut self, flight: Option<String>) -> Result<OrderRecord> {
        if self.items.is_empty() {
            self.emit(&Notice::warning("Your cart is empty"));
            return Err(CartError::EmptyCart);
        }

        let snapshot = self.snapshot();
        let record = OrderRecord {
            order_number: generate_order_number(),
            items: snapshot.items,
            totals: snapshot.totals,
            timestamp: chrono::Utc::now(),
            flight,
        };
        storage::save_json(self.storage.as_ref(), &self.keys.last_order(), &record);

        tracing::info!(
            order_number = %record.order_number,
            total = %record.totals.total,
            "Order confirmed"
        );

        self.items.clear();
        self.commit();
        self.emit(&Notice::success(format!(
            "Order {} placed successfully",
            record.order_number
        )));
        Ok(record)
    }

    /// The most recently confirmed order, if one was persisted.
    #[must_use]
    pub fn last_order(&self) -> Option<OrderRecord> {
        storage::load_json(self.storage.as_ref(), &self.keys.last_order())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn commit(&self) {
        let lines: Vec<&LineItem> = self.items.values().collect();
        storage::save_json(self.storage.as_ref(), &self.keys.cart(), &lines);
        if let Some(notifier) = &self.notifier {
            notifier.cart_changed(&self.snapshot());
        }
    }

    fn emit(&self, notice: &Notice) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(notice);
        }
    }
}
