pub mod pool_initialization;

pub use pool_initialization::{
    GetPoolInitializationById, InsertPoolInitialization, ListPoolInitializations,
    PoolInitializationRecord, RecordDecodeError,
};
