//! HighFlight Core - Shared types library.
//!
//! This crate provides common types used across all HighFlight components:
//! - `storefront` - Cart, favorites and preference stores for the site pages
//! - `cli` - Command-line tool for inspecting and editing persisted state
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item ids, order numbers, prices and themes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
