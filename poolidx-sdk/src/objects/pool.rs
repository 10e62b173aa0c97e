//! Response and query types for the pool initialization API.

use alloy_primitives::{Address, B256, Bytes, FixedBytes, U256};
use serde::{Deserialize, Serialize};

/// Pool-type payload of a decoded config.
///
/// Serialized as a tagged object so that fields of the other variant are
/// absent rather than null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PoolKind {
    Concentrated { tick_spacing: u32 },
    Stableswap { amplification: u8, center_tick: i32 },
}

/// A stored pool initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInitializationResponse {
    /// `block_number ++ transaction_index ++ log_index`, big-endian.
    pub id: FixedBytes<16>,
    pub core_address: Address,
    pub pool_id: B256,
    pub token0: Address,
    pub token1: Address,
    /// Raw 32-byte config as emitted.
    pub config: Bytes,
    pub extension: Address,
    pub fee: u64,
    pub pool_type: PoolKind,
    pub tick: i32,
    pub sqrt_ratio: U256,
    pub block_number: u64,
    pub block_hash: B256,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    pub transaction_index: u32,
    pub log_index: u32,
}

/// Returned by the ingestion endpoint once the event is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestAccepted {
    pub id: FixedBytes<16>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

/// Query parameters for scanning pool initializations in id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPoolInitializationsQuery {
    /// Exclusive lower bound on the id, `0x`-prefixed hex.
    pub after: Option<String>,
    pub limit: Option<u32>,
}

/// Clamp a requested page size to `[1, MAX_LIMIT]`.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
