//! Cart widget configuration.

use cart_observability::{CartLogger, LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Default storage key for the persisted cart.
pub const DEFAULT_STORAGE_KEY: &str = "jm-streetwear-cart";

/// Default label prefixed to displayed prices.
pub const DEFAULT_CURRENCY_LABEL: &str = "R$";

/// Configuration for a cart widget.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Label prefixed to displayed prices.
    pub currency_label: String,
    /// Minimum level for emitted logs.
    pub log_level: LogLevel,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

impl CartConfig {
    /// Create a configuration with the given storage key.
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration object.
    ///
    /// ```
    /// use cart_core::CartConfig;
    /// let config = CartConfig::from_json(r#"{"storage_key": "drop-42"}"#).unwrap();
    /// assert_eq!(config.storage_key, "drop-42");
    /// assert_eq!(config.currency_label, "R$");
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| CartError::Config(e.to_string()))?;
        if config.storage_key.is_empty() {
            return Err(CartError::Config("storage_key must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the currency label.
    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.currency_label = label.into();
        self
    }

    /// Set the minimum log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Build a logger carrying this configuration's context.
    pub fn logger(&self, component: &str) -> CartLogger {
        CartLogger::new(component)
            .with_storage_key(&self.storage_key)
            .with_min_level(self.log_level)
            .with_format(self.log_format)
    }
}
