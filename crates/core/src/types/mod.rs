//! Core types for HighFlight.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod theme;

pub use id::*;
pub use price::{CurrencyCode, CurrencyError, Price};
pub use theme::{Theme, ThemeError};
