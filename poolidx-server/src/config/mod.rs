//! Configuration module for poolidx-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::{FileConfig, StoreConfig};
use poolidx_core::config::{IngestConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    pub store: StoreConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Read, override, validate and convert the configuration file.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.ingest.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "ingest.secret must not be empty".to_string(),
        ));
    }
    if config.store.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "store.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        ingest: IngestConfig::new(
            file_config.ingest.secret.into_bytes(),
            file_config.ingest.core_address,
        ),
        store: file_config.store,
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}
