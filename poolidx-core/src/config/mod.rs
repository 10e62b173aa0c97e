//! Runtime configuration types.
//!
//! These are the validated values used by the indexer and the server.
//! Loading and parsing of the config file is handled by the server crate.

mod ingest;
mod server;

pub use ingest::IngestConfig;
pub use server::ServerConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// Only the ingest section can change at runtime (SIGHUP); the server
/// section is kept here so handlers can report it.
#[derive(Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    pub ingest: Arc<RwLock<IngestConfig>>,
}

impl SharedConfig {
    pub fn new(server: ServerConfig, ingest: IngestConfig) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            ingest: Arc::new(RwLock::new(ingest)),
        }
    }

    /// Replace the ingest section (used during SIGHUP reload).
    pub async fn update_ingest(&self, config: IngestConfig) {
        let mut ingest = self.ingest.write().await;
        *ingest = config;
    }
}
