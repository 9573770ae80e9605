//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in lib.rs)           │
//! │     --json                                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOREFRONT_STORE_NAME=Corner Shop                                  │
//! │     STOREFRONT_NOTIFICATION_TTL_MS=2000                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or ~/.config/storefront/storefront.toml (Linux)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "$"
//! notification_ttl_ms = 2000
//! max_item_quantity = 999
//! output = "text"          # text | json
//! log_filter = "warn"
//! ```
//!
//! Read-only after startup, so no locking.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use storefront_core::MAX_ITEM_QUANTITY;

/// Output format of the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Product cards and cart modal as text
    #[default]
    Text,

    /// One JSON document per response
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Store name shown in the header.
    pub store_name: String,

    /// Currency symbol for prices.
    pub currency_symbol: String,

    /// How long a toast stays visible.
    pub notification_ttl_ms: u64,

    /// Ceiling for the quantity of a single cart line.
    pub max_item_quantity: u32,

    pub output: OutputFormat,

    /// Default tracing filter; `RUST_LOG` wins when set.
    pub log_filter: String,

    /// File the values were read from, if one existed.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Environment overrides that could not be parsed and were skipped.
    #[serde(skip)]
    pub ignored_overrides: Vec<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: "ShopEasy".to_string(),
            currency_symbol: "$".to_string(),
            notification_ttl_ms: 2000,
            max_item_quantity: MAX_ITEM_QUANTITY,
            output: OutputFormat::Text,
            log_filter: "warn".to_string(),
            source: None,
            ignored_overrides: Vec::new(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    ///
    /// Runs before logging is set up, so nothing is logged here; callers
    /// report `source` and `ignored_overrides` once the subscriber exists.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`StorefrontConfig::load`] with environment lookups going through `lookup`.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
                config.source = Some(path);
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_item_quantity == 0 {
            return Err(ConfigError::InvalidValue(
                "max_item_quantity must be greater than 0".into(),
            ));
        }

        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "notification_ttl_ms must be greater than 0".into(),
            ));
        }

        if self.store_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired("store_name".into()));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(ttl) = lookup("STOREFRONT_NOTIFICATION_TTL_MS") {
            match ttl.parse::<u64>() {
                Ok(ms) => self.notification_ttl_ms = ms,
                Err(_) => self
                    .ignored_overrides
                    .push(format!("STOREFRONT_NOTIFICATION_TTL_MS={}", ttl)),
            }
        }

        if let Some(max) = lookup("STOREFRONT_MAX_ITEM_QUANTITY") {
            match max.parse::<u32>() {
                Ok(max) => self.max_item_quantity = max,
                Err(_) => self
                    .ignored_overrides
                    .push(format!("STOREFRONT_MAX_ITEM_QUANTITY={}", max)),
            }
        }

        if let Some(output) = lookup("STOREFRONT_OUTPUT") {
            match output.parse::<OutputFormat>() {
                Ok(format) => self.output = format,
                Err(_) => self
                    .ignored_overrides
                    .push(format!("STOREFRONT_OUTPUT={}", output)),
            }
        }

        if let Some(filter) = lookup("STOREFRONT_LOG") {
            self.log_filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
