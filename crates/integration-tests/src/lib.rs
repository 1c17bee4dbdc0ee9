//! Integration tests for HighFlight.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p highflight-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - Cart scenarios across reloads and checkout
//! - `page_controllers` - Several pages sharing one storage backend
//! - `file_storage` - State surviving a process restart through `FileStore`
//!
//! Helpers in this crate build page state over fresh backends so each test
//! starts from empty storage.

use std::path::PathBuf;
use std::sync::Arc;

use highflight_storefront::{MemoryStore, PageState, StorageKeys, StoreConfig};
use tempfile::TempDir;

/// Config for a page using `namespace` for its keys.
#[must_use]
pub fn config_for(namespace: &str) -> StoreConfig {
    StoreConfig {
        keys: StorageKeys::new(namespace),
        ..StoreConfig::default()
    }
}

/// Open a page over `storage` with default configuration.
#[must_use]
pub fn open_page(storage: &Arc<MemoryStore>) -> PageState {
    PageState::open(StoreConfig::default(), storage.clone(), None)
}

/// A storage file path inside a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for the duration of the test.
#[must_use]
pub fn temp_storage_path() -> (TempDir, PathBuf) {
    // Panics only if the system temp directory is unusable.
    let dir = TempDir::new().expect("create temporary directory");
    let path = dir.path().join("highflight").join("storage.json");
    (dir, path)
}
