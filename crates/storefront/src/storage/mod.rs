//! Key-value persistence for page state.
//!
//! Stores depend on the [`KeyValueStore`] contract only: string keys, string
//! values, `get` and `set`. There is no delete; a cleared collection is written
//! back as an empty JSON array.
//!
//! Two backends ship with the crate:
//! - [`MemoryStore`] - in-process map, the default for tests and embedding
//! - [`FileStore`] - a JSON object file that survives restarts

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A previous writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Persisted key names, derived from a single namespace.
///
/// Every store type owns exactly one key: `<namespace>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub const DEFAULT_NAMESPACE: &'static str = "highflight";

    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn cart(&self) -> String {
        self.key("cart")
    }

    #[must_use]
    pub fn favorites(&self) -> String {
        self.key("favorites")
    }

    #[must_use]
    pub fn compare(&self) -> String {
        self.key("compare")
    }

    #[must_use]
    pub fn theme(&self) -> String {
        self.key("theme")
    }

    #[must_use]
    pub fn last_order(&self) -> String {
        self.key("last-order")
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.namespace)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE)
    }
}

/// Read the raw string under `key`, logging and swallowing backend errors.
pub(crate) fn load_raw(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted state");
            None
        }
    }
}

/// Load and decode a JSON value.
///
/// Absent keys, backend errors and malformed JSON all yield `None`; the latter
/// two are logged so a reset to empty state leaves a diagnostic behind.
pub(crate) fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = load_raw(storage, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed persisted state");
            None
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
///
/// Failures are logged, never returned: persistence is best effort.
pub(crate) fn save_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to encode state for persistence");
            return;
        }
    };
    if let Err(e) = storage.set(key, &json) {
        tracing::warn!(key, error = %e, "Failed to persist state");
    }
}
