use super::{PoolInitializationStore, StoreError};
use crate::entities::PoolInitializationRecord;
use crate::identity::EventId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Bound;
use tokio::sync::RwLock;

/// In-process backend keyed by [`EventId`]. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryPoolInitializationStore {
    records: RwLock<BTreeMap<EventId, PoolInitializationRecord>>,
}

impl MemoryPoolInitializationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PoolInitializationStore for MemoryPoolInitializationStore {
    async fn put(&self, record: PoolInitializationRecord) -> Result<bool, StoreError> {
        match self.records.write().await.entry(record.id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    async fn get(&self, id: EventId) -> Result<Option<PoolInitializationRecord>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        after: Option<EventId>,
        limit: u32,
    ) -> Result<Vec<PoolInitializationRecord>, StoreError> {
        let lower = after.map_or(Bound::Unbounded, Bound::Excluded);
        let records = self.records.read().await;
        Ok(records
            .range((lower, Bound::Unbounded))
            .take(limit as usize)
            .map(|(_, record)| record.clone())
            .collect())
    }
}
