//! Channel factory for delivered events.

use super::types::PoolInitialized;
use tokio::sync::mpsc;

/// Default buffer size for the ingestion channel.
///
/// When the buffer is full, ingestion requests wait for the indexer.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for PoolInitialized events.
pub type PoolInitializedSender = mpsc::Sender<PoolInitialized>;
/// Receiver handle for PoolInitialized events.
pub type PoolInitializedReceiver = mpsc::Receiver<PoolInitialized>;

/// Create a new PoolInitialized channel.
///
/// There must be exactly one receiver so events are indexed in the order
/// they were delivered. Senders can be cloned freely.
pub fn pool_initialized_channel() -> (PoolInitializedSender, PoolInitializedReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
