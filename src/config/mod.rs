//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::validation::AmountPrecision;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (e.g., "127.0.0.1:3000")
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Invoice pages settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicesConfig {
    /// Location of the invoice list; the form navigates here after a create
    #[serde(default = "default_list_path")]
    pub list_path: String,

    /// Fractional precision policy for submitted amounts
    #[serde(default)]
    pub amount_precision: AmountPrecision,
}

impl Default for InvoicesConfig {
    fn default() -> Self {
        Self {
            list_path: default_list_path(),
            amount_precision: AmountPrecision::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Complete configuration for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub invoices: InvoicesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_list_path() -> String {
    "/dashboard/invoices".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            file: path.to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        let list_path = &self.invoices.list_path;
        if !list_path.starts_with('/') || list_path.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "invoices.list_path".to_string(),
                message: format!("'{}' must be an absolute path below '/'", list_path),
            });
        }

        Ok(())
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                message: e.to_string(),
            })
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self::default()
    }
}
