//! Event ingestion configuration.

use alloy_primitives::Address;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Shared HMAC secret the event source signs deliveries with.
    pub secret: Box<[u8]>,
    /// When set, only events emitted by this core contract are indexed.
    pub core_address: Option<Address>,
}

impl IngestConfig {
    pub fn new(secret: impl Into<Box<[u8]>>, core_address: Option<Address>) -> Self {
        Self {
            secret: secret.into(),
            core_address,
        }
    }

    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Whether an event emitted by `emitter` passes the core address filter.
    pub fn accepts(&self, emitter: Address) -> bool {
        self.core_address.is_none_or(|core| core == emitter)
    }
}
