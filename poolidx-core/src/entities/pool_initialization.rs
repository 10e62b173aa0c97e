use crate::framework::DatabaseProcessor;
use crate::identity::{EventId, InvalidEventId};
use crate::pool_config::{PoolConfig, PoolType};
use crate::store::StoreError;
use alloy_primitives::{Address, B256, U256};
use kanau::processor::Processor;
use poolidx_sdk::objects::PoolInitializationResponse;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// One indexed `PoolInitialized` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInitializationRecord {
    pub id: EventId,
    pub core_address: Address,
    pub pool_id: B256,
    pub token0: Address,
    pub token1: Address,
    /// The raw config, kept verbatim next to its decoded fields.
    pub config: PoolConfig,
    pub extension: Address,
    pub fee: u64,
    pub pool_type: PoolType,
    pub tick: i32,
    pub sqrt_ratio: U256,
    pub block_number: u64,
    pub block_hash: B256,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    pub transaction_index: u32,
    pub log_index: u32,
}

impl From<&PoolInitializationRecord> for PoolInitializationResponse {
    fn from(r: &PoolInitializationRecord) -> Self {
        PoolInitializationResponse {
            id: r.id.into(),
            core_address: r.core_address,
            pool_id: r.pool_id,
            token0: r.token0,
            token1: r.token1,
            config: r.config.into(),
            extension: r.extension,
            fee: r.fee,
            pool_type: r.pool_type.into(),
            tick: r.tick,
            sqrt_ratio: r.sqrt_ratio,
            block_number: r.block_number,
            block_hash: r.block_hash,
            block_timestamp: r.block_timestamp,
            transaction_hash: r.transaction_hash,
            transaction_index: r.transaction_index,
            log_index: r.log_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// A stored row that cannot be mapped back into a record.
#[derive(Debug, Error)]
pub enum RecordDecodeError {
    #[error("column {column} has length {actual}, expected {expected}")]
    Length {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("column {0} is out of range")]
    OutOfRange(&'static str),
    #[error("invalid id: {0}")]
    Id(#[from] InvalidEventId),
    #[error("pool type columns are inconsistent")]
    PoolType,
}

const SELECT_COLUMNS: &str = "id, core_address, pool_id, token0, token1, config, extension, fee, \
    tick_spacing, stableswap_amplification, stableswap_center_tick, tick, \
    sqrt_ratio::TEXT AS sqrt_ratio, block_number, block_hash, block_timestamp, \
    transaction_hash, transaction_index, log_index";

#[derive(Debug, Clone, sqlx::FromRow)]
struct PoolInitializationRow {
    id: Vec<u8>,
    core_address: Vec<u8>,
    pool_id: Vec<u8>,
    token0: Vec<u8>,
    token1: Vec<u8>,
    config: Vec<u8>,
    extension: Vec<u8>,
    fee: Decimal,
    tick_spacing: Option<i64>,
    stableswap_amplification: Option<i16>,
    stableswap_center_tick: Option<i32>,
    tick: i32,
    sqrt_ratio: String,
    block_number: i64,
    block_hash: Vec<u8>,
    block_timestamp: i64,
    transaction_hash: Vec<u8>,
    transaction_index: i64,
    log_index: i64,
}

fn fixed<const N: usize>(column: &'static str, bytes: &[u8]) -> Result<[u8; N], RecordDecodeError> {
    <[u8; N]>::try_from(bytes).map_err(|_| RecordDecodeError::Length {
        column,
        expected: N,
        actual: bytes.len(),
    })
}

fn in_range<T: TryFrom<i64>>(column: &'static str, value: i64) -> Result<T, RecordDecodeError> {
    T::try_from(value).map_err(|_| RecordDecodeError::OutOfRange(column))
}

fn pool_type_from_columns(
    tick_spacing: Option<i64>,
    amplification: Option<i16>,
    center_tick: Option<i32>,
) -> Result<PoolType, RecordDecodeError> {
    match (tick_spacing, amplification, center_tick) {
        (Some(tick_spacing), None, None) => Ok(PoolType::Concentrated {
            tick_spacing: in_range("tick_spacing", tick_spacing)?,
        }),
        (None, Some(amplification), Some(center_tick)) => Ok(PoolType::Stableswap {
            amplification: in_range("stableswap_amplification", i64::from(amplification))?,
            center_tick,
        }),
        _ => Err(RecordDecodeError::PoolType),
    }
}

impl TryFrom<PoolInitializationRow> for PoolInitializationRecord {
    type Error = RecordDecodeError;

    fn try_from(row: PoolInitializationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::try_from(row.id.as_slice())?,
            core_address: Address::from(fixed::<20>("core_address", &row.core_address)?),
            pool_id: B256::from(fixed::<32>("pool_id", &row.pool_id)?),
            token0: Address::from(fixed::<20>("token0", &row.token0)?),
            token1: Address::from(fixed::<20>("token1", &row.token1)?),
            config: PoolConfig::new(fixed::<32>("config", &row.config)?),
            extension: Address::from(fixed::<20>("extension", &row.extension)?),
            fee: row.fee.to_u64().ok_or(RecordDecodeError::OutOfRange("fee"))?,
            pool_type: pool_type_from_columns(
                row.tick_spacing,
                row.stableswap_amplification,
                row.stableswap_center_tick,
            )?,
            tick: row.tick,
            sqrt_ratio: U256::from_str_radix(&row.sqrt_ratio, 10)
                .map_err(|_| RecordDecodeError::OutOfRange("sqrt_ratio"))?,
            block_number: in_range("block_number", row.block_number)?,
            block_hash: B256::from(fixed::<32>("block_hash", &row.block_hash)?),
            block_timestamp: in_range("block_timestamp", row.block_timestamp)?,
            transaction_hash: B256::from(fixed::<32>("transaction_hash", &row.transaction_hash)?),
            transaction_index: in_range("transaction_index", row.transaction_index)?,
            log_index: in_range("log_index", row.log_index)?,
        })
    }
}

fn to_bigint(column: &'static str, value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange(column))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a record keyed by its id.
///
/// Uses ON CONFLICT DO NOTHING; returns `false` when the id already exists.
#[derive(Debug, Clone)]
pub struct InsertPoolInitialization {
    pub record: PoolInitializationRecord,
}

impl Processor<InsertPoolInitialization> for DatabaseProcessor {
    type Output = bool;
    type Error = StoreError;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertPoolInitialization")]
    async fn process(&self, insert: InsertPoolInitialization) -> Result<bool, StoreError> {
        let r = insert.record;
        let (tick_spacing, amplification, center_tick) = match r.pool_type {
            PoolType::Concentrated { tick_spacing } => (Some(i64::from(tick_spacing)), None, None),
            PoolType::Stableswap {
                amplification,
                center_tick,
            } => (None, Some(i16::from(amplification)), Some(center_tick)),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO pool_initializations (
                id, core_address, pool_id, token0, token1, config, extension, fee,
                tick_spacing, stableswap_amplification, stableswap_center_tick,
                tick, sqrt_ratio, block_number, block_hash, block_timestamp,
                transaction_hash, transaction_index, log_index
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13::NUMERIC,
                    $14, $15, $16, $17, $18, $19)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(r.id.as_bytes().as_slice())
        .bind(r.core_address.as_slice())
        .bind(r.pool_id.as_slice())
        .bind(r.token0.as_slice())
        .bind(r.token1.as_slice())
        .bind(r.config.as_bytes().as_slice())
        .bind(r.extension.as_slice())
        .bind(Decimal::from(r.fee))
        .bind(tick_spacing)
        .bind(amplification)
        .bind(center_tick)
        .bind(r.tick)
        .bind(r.sqrt_ratio.to_string())
        .bind(to_bigint("block_number", r.block_number)?)
        .bind(r.block_hash.as_slice())
        .bind(to_bigint("block_timestamp", r.block_timestamp)?)
        .bind(r.transaction_hash.as_slice())
        .bind(i64::from(r.transaction_index))
        .bind(i64::from(r.log_index))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[derive(Debug, Clone)]
pub struct GetPoolInitializationById {
    pub id: EventId,
}

impl Processor<GetPoolInitializationById> for DatabaseProcessor {
    type Output = Option<PoolInitializationRecord>;
    type Error = StoreError;
    #[tracing::instrument(skip_all, err, name = "SQL:GetPoolInitializationById")]
    async fn process(
        &self,
        query: GetPoolInitializationById,
    ) -> Result<Option<PoolInitializationRecord>, StoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM pool_initializations WHERE id = $1");
        let row: Option<PoolInitializationRow> = sqlx::query_as(&sql)
            .bind(query.id.as_bytes().as_slice())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PoolInitializationRecord::try_from).transpose()?)
    }
}

/// Scan records in ascending id order, i.e. in chain emission order.
///
/// `after` is exclusive. BYTEA compares bytewise, which matches the
/// ordering of [`EventId`].
#[derive(Debug, Clone)]
pub struct ListPoolInitializations {
    pub after: Option<EventId>,
    pub limit: u32,
}

impl Processor<ListPoolInitializations> for DatabaseProcessor {
    type Output = Vec<PoolInitializationRecord>;
    type Error = StoreError;
    #[tracing::instrument(skip_all, err, name = "SQL:ListPoolInitializations")]
    async fn process(
        &self,
        query: ListPoolInitializations,
    ) -> Result<Vec<PoolInitializationRecord>, StoreError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM pool_initializations \
             WHERE ($1::BYTEA IS NULL OR id > $1) \
             ORDER BY id ASC \
             LIMIT $2"
        );
        let rows: Vec<PoolInitializationRow> = sqlx::query_as(&sql)
            .bind(query.after.map(|id| id.as_bytes().to_vec()))
            .bind(i64::from(query.limit))
            .fetch_all(&self.pool)
            .await?;
        let records = rows
            .into_iter()
            .map(PoolInitializationRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
