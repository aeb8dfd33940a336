// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the slotscan library.
//!
//! Each concern has its own error type, and [`SlotscanError`] wraps them all
//! for callers that do not need to tell the sources apart:
//!
//! - [`RpcError`] - ledger RPC failures
//! - [`CacheError`] - cache backend failures (never surfaced by scans)
//! - [`ScanError`] - failures of latest-slot, range and recent operations
//! - [`EndpointError`] - invalid endpoint configuration
//!
//! # Error policy
//!
//! Reads are best-effort. Per-slot count and summary lookups return a
//! zero-valued result instead of an error when the block cannot be fetched,
//! and every cache failure degrades to a direct ledger fetch. Only the latest
//! slot lookup (and the aggregates built on it) can fail with an RPC error,
//! because there is no safe default for "the newest slot".
//!
//! # Examples
//!
//! ```rust,ignore
//! use slotscan::{Commitment, SlotscanError};
//!
//! async fn newest(scanner: &SlotScanner) -> Result<u64, SlotscanError> {
//!     let latest = scanner.latest_slot(Commitment::Finalized).await?;
//!     Ok(latest.slot)
//! }
//! ```

mod cache;
mod endpoint;
mod rpc;
mod scan;

pub use cache::CacheError;
pub use endpoint::EndpointError;
pub use rpc::{is_block_unavailable_code, RpcError, BLOCK_UNAVAILABLE_CODES};
pub use scan::ScanError;

/// Unified error type for all slotscan operations.
#[derive(Debug, thiserror::Error)]
pub enum SlotscanError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),
}
