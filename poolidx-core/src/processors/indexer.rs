//! PoolInitializationIndexer processor.
//!
//! The indexer is responsible for:
//! - Receiving validated `PoolInitialized` events from the ingestion channel
//! - Applying the core address filter
//! - Decoding and assembling the record
//! - Writing it to the store under its event id
//!
//! Exactly one runner drains the channel, so events are indexed in the
//! order they were delivered.

use crate::assembler::assemble;
use crate::config::IngestConfig;
use crate::events::{PoolInitialized, PoolInitializedReceiver};
use crate::identity::EventId;
use crate::store::{PoolInitializationStore, StoreError};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info, warn};

/// What happened to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    Inserted(EventId),
    /// The id was already stored; the existing record was kept.
    Duplicate(EventId),
    /// Emitted by a contract other than the configured core.
    Ignored(EventId),
}

pub struct PoolInitializationIndexer {
    store: Arc<dyn PoolInitializationStore>,
    ingest: Arc<RwLock<IngestConfig>>,
}

impl PoolInitializationIndexer {
    pub fn new(store: Arc<dyn PoolInitializationStore>, ingest: Arc<RwLock<IngestConfig>>) -> Self {
        Self { store, ingest }
    }

    /// Index one event.
    pub async fn handle(&self, event: PoolInitialized) -> Result<IndexOutcome, StoreError> {
        let id = event.id();

        if !self.ingest.read().await.accepts(event.core_address) {
            warn!(
                id = %id,
                emitter = %event.core_address,
                "Ignoring PoolInitialized from unexpected contract"
            );
            return Ok(IndexOutcome::Ignored(id));
        }

        let record = assemble(&event);
        debug!(
            id = %id,
            pool_id = %record.pool_id,
            pool_type = ?record.pool_type,
            fee = record.fee,
            "Assembled pool initialization"
        );

        if self.store.put(record).await? {
            Ok(IndexOutcome::Inserted(id))
        } else {
            warn!(id = %id, "Pool initialization already stored, keeping existing record");
            Ok(IndexOutcome::Duplicate(id))
        }
    }
}

/// Runner for the indexer.
///
/// Drains the ingestion channel until shutdown is signaled. On shutdown the
/// channel is closed and whatever was already queued is still indexed.
pub struct IndexerRunner {
    indexer: PoolInitializationIndexer,
    event_rx: PoolInitializedReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl IndexerRunner {
    pub fn new(
        indexer: PoolInitializationIndexer,
        event_rx: PoolInitializedReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            indexer,
            event_rx,
            shutdown_rx,
        }
    }

    pub async fn run(mut self) {
        info!("IndexerRunner started");

        loop {
            tokio::select! {
                biased;

                // A dropped shutdown sender counts as a shutdown request.
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("IndexerRunner shutting down, draining queued events");
                        self.drain().await;
                        break;
                    }
                }

                event = self.event_rx.recv() => match event {
                    Some(event) => self.index(event).await,
                    None => {
                        info!("PoolInitialized channel closed");
                        break;
                    }
                },
            }
        }

        info!("IndexerRunner shutdown complete");
    }

    async fn drain(&mut self) {
        self.event_rx.close();
        while let Some(event) = self.event_rx.recv().await {
            self.index(event).await;
        }
    }

    async fn index(&self, event: PoolInitialized) {
        let id = event.id();
        match self.indexer.handle(event).await {
            Ok(IndexOutcome::Inserted(id)) => {
                info!(
                    id = %id,
                    block_number = id.block_number(),
                    "Indexed pool initialization"
                );
            }
            Ok(_) => {}
            Err(e) => {
                error!(id = %id, error = %e, "Failed to index pool initialization");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PoolInitializationRecord;
    use crate::events::pool_initialized_channel;
    use crate::store::MemoryPoolInitializationStore;
    use crate::test_fixtures::{CORE, event_at, sample_event};
    use alloy_primitives::address;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn ingest(core_address: Option<alloy_primitives::Address>) -> Arc<RwLock<IngestConfig>> {
        Arc::new(RwLock::new(IngestConfig::new(b"secret".to_vec(), core_address)))
    }

    #[tokio::test]
    async fn test_handle_inserts_then_reports_duplicate() {
        let store = Arc::new(MemoryPoolInitializationStore::new());
        let indexer = PoolInitializationIndexer::new(store.clone(), ingest(None));
        let id = EventId::compute(99, 7, 3);

        assert_eq!(
            indexer.handle(sample_event()).await.unwrap(),
            IndexOutcome::Inserted(id)
        );
        assert_eq!(
            indexer.handle(sample_event()).await.unwrap(),
            IndexOutcome::Duplicate(id)
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_foreign_core_is_ignored() {
        let store = Arc::new(MemoryPoolInitializationStore::new());
        let other = address!("5000000000000000000000000000000000000000");
        let indexer = PoolInitializationIndexer::new(store.clone(), ingest(Some(other)));

        assert_eq!(
            indexer.handle(sample_event()).await.unwrap(),
            IndexOutcome::Ignored(EventId::compute(99, 7, 3))
        );
        assert!(store.is_empty().await);

        let indexer = PoolInitializationIndexer::new(store.clone(), ingest(Some(CORE)));
        assert!(matches!(
            indexer.handle(sample_event()).await.unwrap(),
            IndexOutcome::Inserted(_)
        ));
    }

    /// Records the order of puts and fails for one chosen block.
    struct RecordingStore {
        seen: Mutex<Vec<EventId>>,
        fail_block: u64,
    }

    #[async_trait]
    impl PoolInitializationStore for RecordingStore {
        async fn put(&self, record: PoolInitializationRecord) -> Result<bool, StoreError> {
            if record.block_number == self.fail_block {
                return Err(StoreError::OutOfRange("block_number"));
            }
            self.seen.lock().unwrap().push(record.id);
            Ok(true)
        }

        async fn get(&self, _id: EventId) -> Result<Option<PoolInitializationRecord>, StoreError> {
            Ok(None)
        }

        async fn list(
            &self,
            _after: Option<EventId>,
            _limit: u32,
        ) -> Result<Vec<PoolInitializationRecord>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_runner_preserves_order_and_survives_failures() {
        let store = Arc::new(RecordingStore {
            seen: Mutex::new(Vec::new()),
            fail_block: 11,
        });
        let indexer = PoolInitializationIndexer::new(store.clone(), ingest(None));
        let (tx, rx) = pool_initialized_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Delivery order is deliberately not id order.
        for (block, tx_index, log) in [(12, 0, 0), (10, 5, 1), (11, 0, 0), (10, 5, 0)] {
            tx.send(event_at(block, tx_index, log)).await.unwrap();
        }

        let handle = tokio::spawn(IndexerRunner::new(indexer, rx, shutdown_rx).run());
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(
            *store.seen.lock().unwrap(),
            vec![
                EventId::compute(12, 0, 0),
                EventId::compute(10, 5, 1),
                EventId::compute(10, 5, 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_runner_stops_when_senders_dropped() {
        let store = Arc::new(MemoryPoolInitializationStore::new());
        let indexer = PoolInitializationIndexer::new(store.clone(), ingest(None));
        let (tx, rx) = pool_initialized_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        tx.send(event_at(1, 0, 0)).await.unwrap();
        tx.send(event_at(2, 0, 0)).await.unwrap();
        drop(tx);

        IndexerRunner::new(indexer, rx, shutdown_rx).run().await;
        assert_eq!(store.len().await, 2);
    }
}
