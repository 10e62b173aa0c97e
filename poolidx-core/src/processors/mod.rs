//! Event processors.
//!
//! - `PoolInitializationIndexer`: decodes, assembles and stores one event
//! - `IndexerRunner`: drains the ingestion channel into the indexer

pub mod indexer;

pub use indexer::{IndexOutcome, IndexerRunner, PoolInitializationIndexer};
