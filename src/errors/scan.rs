// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for slot scan operations.

use super::RpcError;

/// Errors that can be returned by latest-slot, range and recent operations.
///
/// Per-slot count and summary lookups are infallible by contract and never
/// produce this type.
///
/// # Examples
///
/// ```rust,ignore
/// use slotscan::{Commitment, ScanError};
///
/// match scanner.range_counts(10, 50, Commitment::Confirmed).await {
///     Ok(range) => println!("total={}", range.total),
///     Err(ScanError::RangeTooWide { requested, max }) => {
///         eprintln!("asked for {requested} slots, limit is {max}");
///     }
///     Err(e) => eprintln!("scan failed: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The latest slot could not be resolved.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The caller cancelled the scan; partial results were discarded.
    #[error("Scan cancelled")]
    Cancelled,

    /// The requested inclusive range is wider than the configured maximum.
    #[error("Requested range of {requested} slots exceeds the maximum of {max}")]
    RangeTooWide {
        /// Inclusive width of the requested range
        requested: u64,
        /// Configured maximum width
        max: u64,
    },
}

impl ScanError {
    /// Create a `RangeTooWide` error.
    pub fn range_too_wide(requested: u64, max: u64) -> Self {
        ScanError::RangeTooWide { requested, max }
    }
}
