//! Cart configuration.

use std::path::{Path, PathBuf};

use atelier_cache::{FileStore, KeyValueStore, MemoryStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{CachePersistence, CartStore, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;
use crate::money::Currency;

/// Longest accepted namespace, in bytes.
pub const MAX_NAMESPACE_LEN: usize = 64;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Storefront cart configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CartConfig {
    /// Currency every cart line is priced in.
    pub currency: Currency,

    /// Storage key suffix; the cart lives under `cart:<namespace>`.
    pub namespace: String,

    /// Per-line quantity cap.
    pub max_quantity_per_item: i64,

    /// Storage backend.
    pub storage: StorageConfig,

    /// Checkout message settings.
    pub checkout: CheckoutConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            namespace: "default".to_string(),
            max_quantity_per_item: MAX_QUANTITY_PER_ITEM,
            storage: StorageConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

/// Where cart snapshots are stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process memory; the cart does not survive a restart.
    #[default]
    Memory,
    /// One JSON file per key under `dir`.
    File { dir: PathBuf },
}

/// Checkout message settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// WhatsApp number orders are sent to.
    pub phone: String,

    /// First line of the order message.
    pub greeting: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            phone: String::new(),
            greeting: "Hello! I would like to place an order:".to_string(),
        }
    }
}

impl CartConfig {
    /// Load config from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quantity_per_item < 1 {
            return Err(ConfigError::Invalid(format!(
                "max_quantity_per_item must be at least 1, got {}",
                self.max_quantity_per_item
            )));
        }
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("namespace must not be empty".into()));
        }
        if self.namespace.len() > MAX_NAMESPACE_LEN {
            return Err(ConfigError::Invalid(format!(
                "namespace must be at most {} bytes, got {}",
                MAX_NAMESPACE_LEN,
                self.namespace.len()
            )));
        }
        Ok(())
    }

    /// Open the configured storage backend.
    pub fn open_backend(&self) -> Result<Box<dyn KeyValueStore>, CommerceError> {
        match &self.storage {
            StorageConfig::Memory => Ok(Box::new(MemoryStore::new())),
            StorageConfig::File { dir } => Ok(Box::new(FileStore::open(dir)?)),
        }
    }

    /// Open the backend and build a hydrated cart store over it.
    pub fn open_store(
        &self,
    ) -> Result<CartStore<CachePersistence<Box<dyn KeyValueStore>>>, CommerceError> {
        let persistence = CachePersistence::new(self.open_backend()?, &self.namespace);
        Ok(CartStore::initialize(persistence, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSnapshot;
    use crate::money::Money;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.namespace, "default");
        assert_eq!(config.max_quantity_per_item, MAX_QUANTITY_PER_ITEM);
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(CartConfig::from_toml_str("").unwrap(), CartConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = CartConfig::from_toml_str(
            r#"
            currency = "NGN"
            namespace = "lagos"
            max_quantity_per_item = 5

            [storage]
            backend = "file"
            dir = "/var/lib/atelier"

            [checkout]
            phone = "+234 801 234 5678"
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::NGN);
        assert_eq!(config.namespace, "lagos");
        assert_eq!(config.max_quantity_per_item, 5);
        assert_eq!(
            config.storage,
            StorageConfig::File {
                dir: PathBuf::from("/var/lib/atelier")
            }
        );
        assert_eq!(config.checkout.phone, "+234 801 234 5678");
        assert_eq!(config.checkout.greeting, CheckoutConfig::default().greeting);
    }

    #[test]
    fn test_rejects_zero_limit() {
        let result = CartConfig::from_toml_str("max_quantity_per_item = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_long_namespace() {
        let long = "x".repeat(MAX_NAMESPACE_LEN + 1);
        let result = CartConfig::from_toml_str(&format!("namespace = \"{}\"", long));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let longest = "é".repeat(MAX_NAMESPACE_LEN / 2);
        let config = CartConfig::from_toml_str(&format!("namespace = \"{}\"", longest)).unwrap();
        assert_eq!(config.namespace.len(), MAX_NAMESPACE_LEN);
    }

    #[test]
    fn test_longest_namespace_saves_to_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig {
            namespace: "/".repeat(MAX_NAMESPACE_LEN),
            storage: StorageConfig::File {
                dir: dir.path().to_path_buf(),
            },
            ..CartConfig::default()
        };
        config.validate().unwrap();
        let product = ProductSnapshot::new(1u64, "Tide", "", Money::new(1500, Currency::USD));

        let mut store = config.open_store().unwrap();
        store.add_item(&product, 1).unwrap();
        drop(store);

        assert_eq!(config.open_store().unwrap().total_items(), 1);
    }

    #[test]
    fn test_rejects_garbage() {
        let result = CartConfig::from_toml_str("currency = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"currency": "EUR", "namespace": "paris"}"#).unwrap();

        let config = CartConfig::load(&path).unwrap();
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.namespace, "paris");
    }

    #[test]
    fn test_load_missing_file() {
        let result = CartConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_open_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig {
            storage: StorageConfig::File {
                dir: dir.path().to_path_buf(),
            },
            ..CartConfig::default()
        };
        let product = ProductSnapshot::new(1u64, "Tide", "", Money::new(1500, Currency::USD));

        let mut store = config.open_store().unwrap();
        store.add_item(&product, 2).unwrap();
        drop(store);

        let reopened = config.open_store().unwrap();
        assert_eq!(reopened.total_items(), 2);
        assert_eq!(reopened.total_price().amount_cents, 3000);
    }
}
