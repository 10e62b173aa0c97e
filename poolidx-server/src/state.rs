//! Application state shared across all request handlers.

use poolidx_core::config::SharedConfig;
use poolidx_core::events::PoolInitializedSender;
use poolidx_core::store::PoolInitializationStore;
use std::sync::Arc;

/// Cheap to clone; everything is behind `Arc` or a channel handle.
#[derive(Clone)]
pub struct AppState {
    /// Record store, read directly by the lookup endpoints.
    pub store: Arc<dyn PoolInitializationStore>,
    /// Runtime configuration (ingest section can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Queue into the single indexer runner.
    pub event_tx: PoolInitializedSender,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PoolInitializationStore>,
        config: SharedConfig,
        event_tx: PoolInitializedSender,
    ) -> Self {
        Self {
            store,
            config,
            event_tx,
        }
    }
}
