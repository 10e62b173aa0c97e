//! Validated event types.

use crate::identity::EventId;
use crate::pool_config::{ConfigLengthError, PoolConfig};
use alloy_primitives::{Address, B256, U256};
use poolidx_sdk::objects::{BlockInfo, PoolInitializedEvent, TransactionInfo};

/// A delivered `PoolInitialized` event whose config has passed the
/// length check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInitialized {
    /// Contract that emitted the event.
    pub core_address: Address,
    pub block: BlockInfo,
    pub transaction: TransactionInfo,
    pub log_index: u32,
    pub pool_id: B256,
    pub token0: Address,
    pub token1: Address,
    pub config: PoolConfig,
    pub tick: i32,
    pub sqrt_ratio: U256,
}

impl PoolInitialized {
    pub fn id(&self) -> EventId {
        EventId::compute(self.block.number, self.transaction.index, self.log_index)
    }
}

impl TryFrom<PoolInitializedEvent> for PoolInitialized {
    type Error = ConfigLengthError;

    fn try_from(event: PoolInitializedEvent) -> Result<Self, Self::Error> {
        let config = PoolConfig::try_from(event.params.pool_key.config.as_ref())?;
        Ok(Self {
            core_address: event.address,
            block: event.block,
            transaction: event.transaction,
            log_index: event.log_index,
            pool_id: event.params.pool_id,
            token0: event.params.pool_key.token0,
            token1: event.params.pool_key.token1,
            config,
            tick: event.params.tick,
            sqrt_ratio: event.params.sqrt_ratio,
        })
    }
}
