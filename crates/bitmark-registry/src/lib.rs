//! Bitmark Registry Client Library
//!
//! This crate provides a read-only client for the bitmark ledger registry, including:
//! - Transaction lookup
//! - Bitmark lookup, with optional pending and provenance data
//! - Owner-filtered bitmark listings
//! - Latest block height
//!
//! Payloads are returned as raw JSON; only the response envelope is validated.
//!
//! ```no_run
//! use bitmark_registry::RegistryClient;
//!
//! let client = RegistryClient::new("https://registry.example.com")?;
//! let height = client.get_latest_block_number()?;
//! let bitmark = client.get_bitmark("5a1e", false, true)?;
//! println!("block {}: {}", height, bitmark);
//! # Ok::<(), bitmark_registry::RegistryError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod registry;

pub use config::{ClientConfig, ConfigError};
pub use registry::{
    BitmarkCollectionPayload, BitmarkPayload, BlockSummary, Endpoint, ErrorKind, Query,
    RawPayload, RegistryClient, RegistryError, TransactionPayload, SERVER_ERROR_FALLBACK,
};
