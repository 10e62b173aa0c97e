//! TOML file configuration structures.
//!
//! These structs directly map to the `poolidx-config.toml` file format.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Event ingestion section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Shared secret the event source signs deliveries with.
    pub secret: String,
    /// Only index events emitted by this core contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_address: Option<Address>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Record store section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Connection pool size for the postgres backend.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}
