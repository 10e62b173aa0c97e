pub mod event;
pub mod pool;

pub use event::{BlockInfo, PoolInitializedEvent, PoolInitializedParams, PoolKey, TransactionInfo};
pub use pool::{
    IngestAccepted, ListPoolInitializationsQuery, PoolInitializationResponse, PoolKind,
    clamp_limit,
};
