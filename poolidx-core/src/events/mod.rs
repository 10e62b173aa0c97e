//! Event types and the ingestion channel.
//!
//! # Event Flow
//!
//! 1. The ingestion API validates a delivered `PoolInitializedEvent` into a
//!    [`PoolInitialized`] and pushes it onto the channel
//! 2. A single `IndexerRunner` drains the channel in delivery order and
//!    decodes, assembles and stores each event

pub mod channels;
pub mod types;

pub use channels::{
    DEFAULT_CHANNEL_BUFFER, PoolInitializedReceiver, PoolInitializedSender,
    pool_initialized_channel,
};
pub use types::PoolInitialized;
