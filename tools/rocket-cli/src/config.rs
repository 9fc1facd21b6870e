//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rocket_commerce::{Currency, CART_STORAGE_KEY};
use rocket_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["rocketcart.toml", ".rocketcart.toml", "rocketcart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let url = self.api.base_url.trim();
        if url.is_empty() {
            errors.push("api.base_url is required".to_string());
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("api.base_url '{}' must be an http(s) URL", url));
        }

        if self.api.timeout_ms == Some(0) {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }

        if self.storage.key.trim().is_empty() {
            errors.push("storage.key is required".to_string());
        } else if self.storage.key != CART_STORAGE_KEY {
            warnings.push(format!(
                "storage.key '{}' differs from the storefront default '{}'",
                self.storage.key, CART_STORAGE_KEY
            ));
        }

        if self.storage.path.trim().is_empty() {
            errors.push("storage.path is required".to_string());
        }

        (errors, warnings)
    }
}

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Currency product prices are quoted in.
    #[serde(default)]
    pub currency: Currency,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            currency: Currency::default(),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backing file, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> String {
    ".rocketcart/cart.json".to_string()
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// Generate a default rocketcart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketShoes cart configuration

[api]
base_url = "{base_url}"
# timeout_ms = 5000
currency = "BRL"

[storage]
path = "{path}"
key = "{key}"

[logging]
level = "info"
format = "human"
"#,
        base_url = default_base_url(),
        path = default_storage_path(),
        key = CART_STORAGE_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.storage.path, ".rocketcart/cart.json");
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.validate(), (Vec::new(), Vec::new()));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.currency, Currency::BRL);
    }

    #[test]
    fn test_partial_json_config() {
        let config: CliConfig =
            serde_json::from_str(r#"{"api":{"base_url":"https://api.example.com","timeout_ms":250}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.storage.key, CART_STORAGE_KEY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:3333".to_string();
        config.api.timeout_ms = Some(0);
        config.storage.key = " ".to_string();

        let (errors, _) = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("api.base_url"));
    }

    #[test]
    fn test_validate_warns_on_custom_key() {
        let mut config = CliConfig::default();
        config.storage.key = "cart".to_string();

        let (errors, warnings) = config.validate();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
