//! Configuration management for coinview
//!
//! This module handles loading, validation, and management of
//! coinview configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorDetails, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Exchange-rate API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the CoinAPI REST service, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Access key sent as the `apikey` query parameter
    #[serde(default)]
    pub key: String,
    /// Asset every rate is quoted against
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            quote_currency: default_quote_currency(),
        }
    }
}

fn default_base_url() -> String {
    "http://rest-sandbox.coinapi.io/v1".to_string()
}

fn default_quote_currency() -> String {
    "USD".to_string()
}

/// A currency listed on the currencies page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: String,
}

impl Currency {
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

fn default_currencies() -> Vec<Currency> {
    vec![
        Currency::new("Bitcoin", "BTC"),
        Currency::new("Litecoin", "LTC"),
        Currency::new("Ethereum", "ETH"),
        Currency::new("Ethereum Classic", "ETC"),
        Currency::new("Stellar Lumens", "XLM"),
        Currency::new("Dash", "DASH"),
        Currency::new("Ripple", "XRP"),
        Currency::new("Zcash", "ZEC"),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Exchange-rate API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Currencies shown on the currencies page
    #[serde(default = "default_currencies")]
    pub currencies: Vec<Currency>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            currencies: default_currencies(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// Validation is left to the caller so command line overrides can be
    /// applied first.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.api.key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.key".to_string(),
            });
        }

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.api.quote_currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.quote_currency".to_string(),
                reason: "Quote currency must not be empty".to_string(),
            });
        }

        if let Some(idx) = self.currencies.iter().position(|c| c.symbol.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("currencies[{}].symbol", idx),
                reason: "Currency symbol must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
