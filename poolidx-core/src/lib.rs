#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![forbid(unsafe_code)]

pub mod assembler;
pub mod config;
pub mod entities;
pub mod events;
pub mod framework;
pub mod identity;
pub mod pool_config;
pub mod processors;
pub mod store;

#[cfg(test)]
pub(crate) mod test_fixtures;
