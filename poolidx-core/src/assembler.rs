//! Builds the stored record for a delivered event.

use crate::entities::PoolInitializationRecord;
use crate::events::PoolInitialized;

/// Decode the event's config and combine it with the event parameters and
/// chain provenance. Pure; the caller decides what to do with the record.
pub fn assemble(event: &PoolInitialized) -> PoolInitializationRecord {
    let decoded = event.config.decode();

    PoolInitializationRecord {
        id: event.id(),
        core_address: event.core_address,
        pool_id: event.pool_id,
        token0: event.token0,
        token1: event.token1,
        config: event.config,
        extension: decoded.extension,
        fee: decoded.fee,
        pool_type: decoded.pool_type,
        tick: event.tick,
        sqrt_ratio: event.sqrt_ratio,
        block_number: event.block.number,
        block_hash: event.block.hash,
        block_timestamp: event.block.timestamp,
        transaction_hash: event.transaction.hash,
        transaction_index: event.transaction.index,
        log_index: event.log_index,
    }
}
