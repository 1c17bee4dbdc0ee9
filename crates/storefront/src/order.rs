//! Order numbers and the record kept for the most recent checkout.

use chrono::{DateTime, Datelike, Local, Utc};
use highflight_core::OrderNumber;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cart::{CartTotals, LineItem};

/// Largest random suffix of an order number.
const MAX_ORDER_SUFFIX: u16 = 999;

/// Format an order number as `#ORD-<year>-<NNN>`.
///
/// `suffix` is reduced modulo 1000 so the numeric part is always three digits.
#[must_use]
pub fn format_order_number(year: i32, suffix: u16) -> OrderNumber {
    OrderNumber::new(format!(
        "#ORD-{year}-{:03}",
        suffix % (MAX_ORDER_SUFFIX + 1)
    ))
}

/// Generate an order number for the current local year.
///
/// The suffix is drawn uniformly from `0..=999`; collisions are possible and
/// acceptable, the number is only shown to the visitor.
#[must_use]
pub fn generate_order_number() -> OrderNumber {
    let year = Local::now().year();
    let suffix = rand::rng().random_range(0..=MAX_ORDER_SUFFIX);
    format_order_number(year, suffix)
}

/// A confirmed order, persisted as the visitor's last order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_number: OrderNumber,
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub timestamp: DateTime<Utc>,
    /// Flight or trip the order is attached to, if the page knows it.
    #[serde(default)]
    pub flight: Option<String>,
}
