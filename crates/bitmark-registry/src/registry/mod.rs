//! Registry client for the bitmark ledger registry
//!
//! Provides a blocking HTTP client for the registry's read-only query API.

mod api;
mod client;
mod endpoint;

pub use api::{
    BitmarkCollectionPayload, BitmarkPayload, BlockSummary, Envelope, RawPayload,
    TransactionPayload,
};
pub use client::{ErrorKind, RegistryClient, RegistryError, SERVER_ERROR_FALLBACK};
pub use endpoint::{Endpoint, Query};
