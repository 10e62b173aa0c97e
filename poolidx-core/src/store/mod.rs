//! Storage for pool initialization records.
//!
//! The indexer only needs insert-by-id and lookup; the range scan serves
//! the read API. Each backend implements [`PoolInitializationStore`].

mod memory;
mod postgres;

pub use memory::MemoryPoolInitializationStore;
pub use postgres::PgPoolInitializationStore;

use crate::entities::{PoolInitializationRecord, RecordDecodeError};
use crate::identity::EventId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row no longer maps to a valid record.
    #[error("corrupt record: {0}")]
    Corrupt(#[from] RecordDecodeError),

    /// A value does not fit the column type of the backend.
    #[error("{0} is out of range for storage")]
    OutOfRange(&'static str),
}

#[async_trait]
pub trait PoolInitializationStore: Send + Sync {
    /// Insert a record under its id.
    ///
    /// Returns `false` and leaves the stored record untouched when the id
    /// already exists.
    async fn put(&self, record: PoolInitializationRecord) -> Result<bool, StoreError>;

    async fn get(&self, id: EventId) -> Result<Option<PoolInitializationRecord>, StoreError>;

    /// Up to `limit` records with ids strictly greater than `after`, in
    /// ascending id order.
    async fn list(
        &self,
        after: Option<EventId>,
        limit: u32,
    ) -> Result<Vec<PoolInitializationRecord>, StoreError>;
}
