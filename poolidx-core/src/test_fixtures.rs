//! Shared event fixtures for unit tests.

use crate::events::PoolInitialized;
use crate::pool_config::PoolConfig;
use alloy_primitives::{Address, B256, U256, address, b256};
use poolidx_sdk::objects::{BlockInfo, TransactionInfo};

pub const CORE: Address = address!("4000000000000000000000000000000000000000");
pub const TOKEN0: Address = address!("2000000000000000000000000000000000000000");
pub const TOKEN1: Address = address!("3000000000000000000000000000000000000000");
pub const EXTENSION: Address = address!("1000000000000000000000000000000000000001");
pub const POOL_ID: B256 =
    b256!("000000000000000000000000000000000000000000000000000000000000c0de");
pub const TX_HASH: B256 =
    b256!("0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20");
pub const BLOCK_HASH: B256 =
    b256!("aa00000000000000000000000000000000000000000000000000000000000055");

/// Concentrated pool, fee 3000, tick spacing 60, block 99 / tx 7 / log 3.
pub fn sample_event() -> PoolInitialized {
    PoolInitialized {
        core_address: CORE,
        block: BlockInfo {
            number: 99,
            hash: BLOCK_HASH,
            timestamp: 1234,
        },
        transaction: TransactionInfo {
            hash: TX_HASH,
            index: 7,
        },
        log_index: 3,
        pool_id: POOL_ID,
        token0: TOKEN0,
        token1: TOKEN1,
        config: PoolConfig::encode(EXTENSION, 3000, 0x8000_0000 | 60),
        tick: 15,
        sqrt_ratio: U256::from(123456u64),
    }
}

pub fn event_at(block_number: u64, transaction_index: u32, log_index: u32) -> PoolInitialized {
    let mut event = sample_event();
    event.block.number = block_number;
    event.transaction.index = transaction_index;
    event.log_index = log_index;
    event
}

pub fn stableswap_event(amplification: u8, center_tick_compressed: u32) -> PoolInitialized {
    let mut event = sample_event();
    let type_config = (u32::from(amplification) << 24) | center_tick_compressed;
    event.config = PoolConfig::encode(EXTENSION, 3000, type_config);
    event
}
