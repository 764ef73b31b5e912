//! Configuration management for the inventory gateway
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides: `INV_` prefix, `__` between levels,
//!    e.g. `INV_UPSTREAM__BASE_URL`, `INV_ENVIRONMENT`

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::InventorySettings;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote billing API
    pub upstream: UpstreamConfig,

    /// Offline cache
    pub cache: CacheConfig,

    /// Reconciliation settings (threshold, merge strategy, purchase pricing)
    #[serde(default)]
    pub inventory: InventorySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the billing REST API, e.g. `https://billing.example.com/api`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Where snapshots live
    pub kind: CacheKind,

    /// Directory holding one snapshot file per company (`file` only)
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    File,
    Memory,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.timeout_secs", 15)?
            .set_default("cache.kind", "file")?
            .set_default("cache.directory", "cache")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables
            .add_source(env_source())
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "upstream.base_url must be set".to_string(),
            ));
        }
        self.inventory
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `INV_<SECTION>__<KEY>` variables, matching `INV_ENVIRONMENT`
fn env_source() -> Environment {
    Environment::with_prefix("INV")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;
    use rust_decimal::Decimal;
    use shared::{MergeStrategy, PurchasePricing};

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        let config: Config = config::Config::builder()
            .set_default("environment", "test")?
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("upstream.timeout_secs", 15)?
            .set_default("cache.kind", "file")?
            .set_default("cache.directory", "cache")?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_inventory_defaults_when_section_missing() {
        let config = from_toml(
            r#"
            [upstream]
            base_url = "http://localhost:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory, InventorySettings::default());
        assert_eq!(config.cache.kind, CacheKind::File);
        assert_eq!(config.upstream.timeout_secs, 15);
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_inventory_section_overrides() {
        let config = from_toml(
            r#"
            [upstream]
            base_url = "http://localhost:8080"

            [inventory]
            low_stock_threshold = 25
            merge_strategy = "last_write_wins"
            purchase_pricing = "per_unit_from_invoice_total"
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory.low_stock_threshold, Decimal::from(25));
        assert_eq!(config.inventory.merge_strategy, MergeStrategy::LastWriteWins);
        assert_eq!(
            config.inventory.purchase_pricing,
            PurchasePricing::PerUnitFromInvoiceTotal
        );
        assert_eq!(config.inventory.default_category, "General");
    }

    #[test]
    fn test_environment_variables_use_single_underscore_prefix() {
        let vars: HashMap<String, String> = [
            ("INV_UPSTREAM__BASE_URL", "http://billing.env/api"),
            ("INV_INVENTORY__LOW_STOCK_THRESHOLD", "3"),
            ("INV_CACHE__KIND", "memory"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: Config = config::Config::builder()
            .set_default("environment", "test")
            .unwrap()
            .set_default("server.port", 3000)
            .unwrap()
            .set_default("server.host", "127.0.0.1")
            .unwrap()
            .set_default("upstream.timeout_secs", 15)
            .unwrap()
            .set_default("cache.kind", "file")
            .unwrap()
            .set_default("cache.directory", "cache")
            .unwrap()
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.upstream.base_url, "http://billing.env/api");
        assert_eq!(config.inventory.low_stock_threshold, Decimal::from(3));
        assert_eq!(config.cache.kind, CacheKind::Memory);
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        let result = from_toml(
            r#"
            [upstream]
            base_url = ""
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let result = from_toml(
            r#"
            [upstream]
            base_url = "http://localhost:8080"

            [inventory]
            low_stock_threshold = -5
            "#,
        );
        assert!(result.is_err());
    }
}
