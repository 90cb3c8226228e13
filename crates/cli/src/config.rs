//! Configuration loading from authz.toml.

use authz::AddressCodec;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Address encoding used by `validate_basic`.
    #[serde(default)]
    pub address: AddressConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct AddressConfig {
    /// Bech32 prefix of account addresses.
    #[serde(default = "default_account_prefix")]
    pub account_prefix: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            account_prefix: default_account_prefix(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_account_prefix() -> String {
    authz::DEFAULT_ACCOUNT_PREFIX.to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.address.account_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(config)
    }

    pub fn codec(&self) -> AddressCodec {
        AddressCodec::new(&self.address.account_prefix)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("address.account_prefix cannot be empty")]
    EmptyPrefix,
}
