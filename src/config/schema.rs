//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Durable session storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the persisted token and role
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".storefront/session.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// How views render values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "LKR".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl DisplayConfig {
    /// Format an amount with the configured currency, two decimals
    pub fn format_price(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config =
            toml::from_str("[api]\nbase_url = \"http://shop.test/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://shop.test/api");
        assert_eq!(config.storage.path, PathBuf::from(".storefront/session.json"));
        assert_eq!(config.display.currency, "LKR");
    }

    #[test]
    fn test_format_price() {
        let display = DisplayConfig {
            currency: "$".to_string(),
        };
        assert_eq!(display.format_price(10.0), "$ 10.00");
        assert_eq!(DisplayConfig::default().format_price(2.5), "LKR 2.50");
    }
}
