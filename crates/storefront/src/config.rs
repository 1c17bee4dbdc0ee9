//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `HIGHFLIGHT_NAMESPACE` - Prefix for persisted keys (default: highflight)
//! - `HIGHFLIGHT_SERVICE_CHARGE` - Flat charge added at checkout (default: 5.00)
//! - `HIGHFLIGHT_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.10)
//! - `HIGHFLIGHT_CURRENCY` - Display currency, ISO 4217 (default: USD)
//! - `HIGHFLIGHT_COMPARE_LIMIT` - Hotels that can be compared at once (default: 3)
//! - `HIGHFLIGHT_STORAGE_PATH` - File used by `FileStore` (default: .highflight/storage.json)

use std::path::PathBuf;

use highflight_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::Pricing;
use crate::compare::DEFAULT_COMPARE_LIMIT;
use crate::storage::StorageKeys;

const DEFAULT_STORAGE_PATH: &str = ".highflight/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Configuration shared by every store on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Persisted key names
    pub keys: StorageKeys,
    /// Service charge and tax
    pub pricing: Pricing,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Maximum size of the hotel comparison list
    pub compare_limit: usize,
    /// Location of the file-backed store
    pub storage_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            pricing: Pricing::default(),
            currency: CurrencyCode::default(),
            compare_limit: DEFAULT_COMPARE_LIMIT,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let namespace = get("HIGHFLIGHT_NAMESPACE")
            .map_or_else(|| StorageKeys::DEFAULT_NAMESPACE.to_owned(), |v| v.trim().to_owned());

        let defaults = Pricing::default();
        let service_charge = match get("HIGHFLIGHT_SERVICE_CHARGE") {
            Some(v) => parse_decimal("HIGHFLIGHT_SERVICE_CHARGE", &v)?,
            None => defaults.service_charge(),
        };
        let tax_rate = match get("HIGHFLIGHT_TAX_RATE") {
            Some(v) => parse_decimal("HIGHFLIGHT_TAX_RATE", &v)?,
            None => defaults.tax_rate(),
        };
        let pricing = Pricing::new(service_charge, tax_rate).map_err(|e| {
            let var = if matches!(e, crate::error::CartError::InvalidTaxRate(_)) {
                "HIGHFLIGHT_TAX_RATE"
            } else {
                "HIGHFLIGHT_SERVICE_CHARGE"
            };
            ConfigError::InvalidEnvVar(var.to_string(), e.to_string())
        })?;

        let currency = match get("HIGHFLIGHT_CURRENCY") {
            Some(v) => v.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("HIGHFLIGHT_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        let compare_limit = match get("HIGHFLIGHT_COMPARE_LIMIT") {
            Some(v) => parse_compare_limit(&v)?,
            None => DEFAULT_COMPARE_LIMIT,
        };

        let storage_path = get("HIGHFLIGHT_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        Ok(Self {
            keys: StorageKeys::new(namespace),
            pricing,
            currency,
            compare_limit,
            storage_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_compare_limit(value: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("HIGHFLIGHT_COMPARE_LIMIT".to_string(), reason)
    };
    let limit = value
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if limit == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(limit)
}
