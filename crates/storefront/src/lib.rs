//! HighFlight Storefront library.
//!
//! Client-side state for the site pages: the shopping cart, favorites, the
//! hotel comparison list and the theme preference, each persisted to a
//! string key-value store after every change.
//!
//! # Architecture
//!
//! - [`storage`] - `KeyValueStore` contract plus memory and file backends
//! - [`cart`] - line items, totals, checkout
//! - [`favorites`], [`compare`] - persisted id sets
//! - [`preferences`] - theme preference
//! - [`state`] - `PageState`, the per-page owner of all stores
//!
//! Rendering is left to the caller: stores expose snapshots and report
//! changes through an optional [`notify::Notifier`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod discount;
pub mod error;
pub mod favorites;
pub mod notify;
pub mod order;
pub mod preferences;
pub mod state;
pub mod storage;

pub use cart::{CartSnapshot, CartStore, CartTotals, LineItem, Pricing};
pub use config::{ConfigError, StoreConfig};
pub use error::CartError;
pub use favorites::FavoritesStore;
pub use state::PageState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageKeys};
