use super::{PoolInitializationStore, StoreError};
use crate::entities::{
    GetPoolInitializationById, InsertPoolInitialization, ListPoolInitializations,
    PoolInitializationRecord,
};
use crate::framework::DatabaseProcessor;
use crate::identity::EventId;
use async_trait::async_trait;
use kanau::processor::Processor;
use sqlx::PgPool;

/// PostgreSQL backend. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgPoolInitializationStore {
    processor: DatabaseProcessor,
}

impl PgPoolInitializationStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            processor: DatabaseProcessor { pool },
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.processor.pool
    }
}

#[async_trait]
impl PoolInitializationStore for PgPoolInitializationStore {
    async fn put(&self, record: PoolInitializationRecord) -> Result<bool, StoreError> {
        self.processor
            .process(InsertPoolInitialization { record })
            .await
    }

    async fn get(&self, id: EventId) -> Result<Option<PoolInitializationRecord>, StoreError> {
        self.processor.process(GetPoolInitializationById { id }).await
    }

    async fn list(
        &self,
        after: Option<EventId>,
        limit: u32,
    ) -> Result<Vec<PoolInitializationRecord>, StoreError> {
        self.processor
            .process(ListPoolInitializations { after, limit })
            .await
    }
}
