//! Order-preserving event identifiers.
//!
//! An [`EventId`] is the big-endian concatenation of the block number,
//! the transaction index within the block, and the log index within the
//! transaction. Byte-lexicographic order on ids is therefore the order in
//! which the events were emitted on chain.

use alloy_primitives::{FixedBytes, hex};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const EVENT_ID_LEN: usize = 16;

const TX_INDEX_OFFSET: usize = 8;
const LOG_INDEX_OFFSET: usize = 12;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId([u8; EVENT_ID_LEN]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventId {
    #[error("event id must be {EVENT_ID_LEN} bytes, got {0}")]
    Length(usize),
    #[error("event id is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl EventId {
    pub fn compute(block_number: u64, transaction_index: u32, log_index: u32) -> Self {
        let mut id = [0u8; EVENT_ID_LEN];
        id[..TX_INDEX_OFFSET].copy_from_slice(&block_number.to_be_bytes());
        id[TX_INDEX_OFFSET..LOG_INDEX_OFFSET].copy_from_slice(&transaction_index.to_be_bytes());
        id[LOG_INDEX_OFFSET..].copy_from_slice(&log_index.to_be_bytes());
        Self(id)
    }

    pub const fn from_bytes(bytes: [u8; EVENT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; EVENT_ID_LEN] {
        &self.0
    }

    pub fn block_number(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[..TX_INDEX_OFFSET]);
        u64::from_be_bytes(bytes)
    }

    pub fn transaction_index(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[TX_INDEX_OFFSET..LOG_INDEX_OFFSET]);
        u32::from_be_bytes(bytes)
    }

    pub fn log_index(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[LOG_INDEX_OFFSET..]);
        u32::from_be_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for EventId {
    type Error = InvalidEventId;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <[u8; EVENT_ID_LEN]>::try_from(value)
            .map(Self)
            .map_err(|_| InvalidEventId::Length(value.len()))
    }
}

/// Accepts hex with or without the `0x` prefix.
impl FromStr for EventId {
    type Err = InvalidEventId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(self.0))
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({self})")
    }
}

impl From<EventId> for FixedBytes<EVENT_ID_LEN> {
    fn from(value: EventId) -> Self {
        FixedBytes(value.0)
    }
}

impl From<FixedBytes<EVENT_ID_LEN>> for EventId {
    fn from(value: FixedBytes<EVENT_ID_LEN>) -> Self {
        Self(value.0)
    }
}
