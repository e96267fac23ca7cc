//! Configuration module for loading TOML files and environment overrides.

use crate::db::DEFAULT_DATABASE_URL;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "HEARTBRIDGE_CONFIG";

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "PORT";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database pool configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database pool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string.
    pub url: String,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Upper bound on live connections.
    pub max_connections: u32,
    /// Statement timeout in seconds.
    pub command_timeout_secs: u64,
    /// Maximum wait for a free connection, in seconds.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            min_connections: 1,
            max_connections: 10,
            command_timeout_secs: 60,
            acquire_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from the process environment.
    ///
    /// Reads the file named by `HEARTBRIDGE_CONFIG` if set, then applies
    /// `DATABASE_URL`, `HOST` and `PORT` overrides.
    ///
    /// # Errors
    /// Returns error if the file cannot be loaded or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => toml::from_str(&fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment-style overrides looked up through `lookup`.
    ///
    /// # Errors
    /// Returns error if `PORT` is not a valid port number.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("PORT must be a valid number, got {port}"))
            })?;
        }
        Ok(self)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "database url cannot be empty".to_string(),
            ));
        }
        if db.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database max_connections must be positive".to_string(),
            ));
        }
        if db.min_connections > db.max_connections {
            return Err(ConfigError::InvalidValue(format!(
                "database min_connections ({}) exceeds max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }
        if db.command_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "database command_timeout_secs must be positive".to_string(),
            ));
        }
        if db.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "database acquire_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
