//! `PoolInitialized` event as delivered to the ingestion API.
//!
//! Field names mirror the chain event: block and transaction provenance,
//! the emitting contract `address`, and the decoded ABI `params`.

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::signature::Signature;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInitializedEvent {
    /// Contract that emitted the event (the core).
    pub address: Address,
    pub block: BlockInfo,
    pub transaction: TransactionInfo,
    pub log_index: u32,
    pub params: PoolInitializedParams,
}

impl Signature for PoolInitializedEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub number: u64,
    pub hash: B256,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub hash: B256,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInitializedParams {
    pub pool_id: B256,
    pub pool_key: PoolKey,
    pub tick: i32,
    pub sqrt_ratio: U256,
}

/// Pool key as emitted on chain.
///
/// `config` is kept as dynamic bytes on the wire so that a malformed
/// length can be rejected explicitly instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolKey {
    pub token0: Address,
    pub token1: Address,
    pub config: Bytes,
}
