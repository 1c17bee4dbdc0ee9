//! Errors returned by the page stores.
//!
//! Operations on unknown ids are no-ops rather than errors, and persistence
//! failures are logged instead of surfaced, so the variants here cover only
//! input the stores refuse to accept.

use highflight_core::ItemId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Unit price is negative.
    #[error("invalid price {0}: must not be negative")]
    InvalidPrice(Decimal),

    /// Quantity to add is zero.
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidQuantity(u32),

    /// The catalog has no entry for the requested item.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// The cart total would not fit in a `Decimal`.
    #[error("cart total is too large")]
    AmountOverflow,

    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Flat service charge is negative.
    #[error("invalid service charge {0}: must not be negative")]
    InvalidServiceCharge(Decimal),

    /// Tax rate is outside [0, 1].
    #[error("invalid tax rate {0}: must be between 0 and 1")]
    InvalidTaxRate(Decimal),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
