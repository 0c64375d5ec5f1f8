//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Secrets (the bot token) are read from the environment at the point of use
//! and never stored here.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level structure of `config.toml`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback tracing filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// HTTP API settings
    pub server: ServerConfig,
    /// Chat bot settings
    pub bot: BotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            bot: BotConfig::default(),
        }
    }
}

/// HTTP API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Whether to serve the REST API at all
    pub enabled: bool,
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat bot settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Whether to start the Discord bot; false gives an API-only deployment
    pub enabled: bool,
    /// Register commands in this guild only (instant updates during development)
    pub guild_id: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            guild_id: None,
        }
    }
}

/// Parses settings from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads `config.toml` from the location in `COFFEE_CUPS_CONFIG` (default
/// `./config.toml`), falling back to defaults when the file does not exist.
///
/// Returns the path the settings were read from, or `None` for defaults.
/// Nothing is logged here since this runs before tracing is installed.
pub fn load_app_configuration() -> Result<(AppConfig, Option<PathBuf>)> {
    let path = std::env::var("COFFEE_CUPS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_app_configuration_from(path)
}

/// Like [`load_app_configuration`], for an explicit path.
pub fn load_app_configuration_from<P: AsRef<Path>>(
    path: P,
) -> Result<(AppConfig, Option<PathBuf>)> {
    let path = path.as_ref();
    if path.exists() {
        Ok((load_config(path)?, Some(path.to_path_buf())))
    } else {
        Ok((AppConfig::default(), None))
    }
}
