//! Decoder for the packed 32-byte pool config.
//!
//! Layout (big-endian):
//!
//! ```text
//! [0, 20)   extension address
//! [20, 28)  fee (u64)
//! [28, 32)  type config (u32)
//! ```
//!
//! Bit 31 of the type config selects the pool type. When set, the low
//! 31 bits are the tick spacing of a concentrated pool. When clear, the
//! top byte is the stableswap amplification and the low 24 bits are the
//! center tick as a signed value in units of [`CENTER_TICK_SCALE`] ticks.
//!
//! Every 32-byte input decodes to some value; there is no invalid encoding.

use alloy_primitives::{Address, Bytes, hex};
use poolidx_sdk::objects::PoolKind;
use std::fmt;
use thiserror::Error;

/// Length of the packed config in bytes.
pub const CONFIG_LEN: usize = 32;

const FEE_OFFSET: usize = 20;
const TYPE_CONFIG_OFFSET: usize = 28;

const CONCENTRATED_FLAG: u32 = 0x8000_0000;
const TICK_SPACING_MASK: u32 = 0x7FFF_FFFF;
const CENTER_TICK_MASK: u32 = 0x00FF_FFFF;

/// Center ticks are stored on chain in multiples of this many ticks.
pub const CENTER_TICK_SCALE: i32 = 16;

/// A config field that is not exactly [`CONFIG_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pool config must be exactly {CONFIG_LEN} bytes, got {actual}")]
pub struct ConfigLengthError {
    pub actual: usize,
}

/// The raw packed config, exactly as emitted on chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig([u8; CONFIG_LEN]);

impl PoolConfig {
    pub const fn new(bytes: [u8; CONFIG_LEN]) -> Self {
        Self(bytes)
    }

    /// Pack an extension, fee and type config into the on-chain layout.
    pub fn encode(extension: Address, fee: u64, type_config: u32) -> Self {
        let mut bytes = [0u8; CONFIG_LEN];
        bytes[..FEE_OFFSET].copy_from_slice(extension.as_slice());
        bytes[FEE_OFFSET..TYPE_CONFIG_OFFSET].copy_from_slice(&fee.to_be_bytes());
        bytes[TYPE_CONFIG_OFFSET..].copy_from_slice(&type_config.to_be_bytes());
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; CONFIG_LEN] {
        &self.0
    }

    /// Bytes `[0, 20)`.
    pub fn extension(&self) -> Address {
        let mut address = [0u8; FEE_OFFSET];
        address.copy_from_slice(&self.0[..FEE_OFFSET]);
        Address::from(address)
    }

    /// Bytes `[20, 28)` as a big-endian `u64`.
    pub fn fee(&self) -> u64 {
        let mut fee = [0u8; TYPE_CONFIG_OFFSET - FEE_OFFSET];
        fee.copy_from_slice(&self.0[FEE_OFFSET..TYPE_CONFIG_OFFSET]);
        u64::from_be_bytes(fee)
    }

    /// Bytes `[28, 32)` as a big-endian `u32`.
    pub fn type_config(&self) -> u32 {
        let mut raw = [0u8; CONFIG_LEN - TYPE_CONFIG_OFFSET];
        raw.copy_from_slice(&self.0[TYPE_CONFIG_OFFSET..]);
        u32::from_be_bytes(raw)
    }

    pub fn pool_type(&self) -> PoolType {
        PoolType::decode(self.type_config())
    }

    pub fn decode(&self) -> DecodedPoolConfig {
        let type_config = self.type_config();
        DecodedPoolConfig {
            extension: self.extension(),
            fee: self.fee(),
            type_config,
            pool_type: PoolType::decode(type_config),
        }
    }
}

impl TryFrom<&[u8]> for PoolConfig {
    type Error = ConfigLengthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <[u8; CONFIG_LEN]>::try_from(value)
            .map(Self)
            .map_err(|_| ConfigLengthError {
                actual: value.len(),
            })
    }
}

impl From<PoolConfig> for Bytes {
    fn from(value: PoolConfig) -> Self {
        Bytes::copy_from_slice(&value.0)
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolConfig({})", hex::encode_prefixed(self.0))
    }
}

/// Pool-type payload selected by the high bit of the type config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolType {
    Concentrated {
        tick_spacing: u32,
    },
    Stableswap {
        amplification: u8,
        /// Uncompressed center tick (already multiplied by [`CENTER_TICK_SCALE`]).
        center_tick: i32,
    },
}

impl PoolType {
    pub fn decode(raw: u32) -> Self {
        if raw & CONCENTRATED_FLAG != 0 {
            return PoolType::Concentrated {
                tick_spacing: raw & TICK_SPACING_MASK,
            };
        }

        let amplification = (raw >> 24) as u8;
        // Move bit 23 into the sign position, then shift back arithmetically.
        let compressed = (((raw & CENTER_TICK_MASK) << 8) as i32) >> 8;
        PoolType::Stableswap {
            amplification,
            center_tick: compressed * CENTER_TICK_SCALE,
        }
    }
}

impl From<PoolType> for PoolKind {
    fn from(value: PoolType) -> Self {
        match value {
            PoolType::Concentrated { tick_spacing } => PoolKind::Concentrated { tick_spacing },
            PoolType::Stableswap {
                amplification,
                center_tick,
            } => PoolKind::Stableswap {
                amplification,
                center_tick,
            },
        }
    }
}

/// All fields unpacked from a [`PoolConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedPoolConfig {
    pub extension: Address,
    pub fee: u64,
    pub type_config: u32,
    pub pool_type: PoolType,
}
