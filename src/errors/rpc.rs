// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by ledger RPC operations.

use std::time::Duration;

use crate::types::Slot;

/// JSON-RPC error codes the ledger uses to say "there is no block for this slot"
///
/// - `-32001`: block cleaned up (pruned from the node's ledger)
/// - `-32004`: block not available for slot
/// - `-32007`: slot was skipped, or missing due to a ledger jump
/// - `-32009`: slot missing in long-term storage
/// - `-32014`: block status not yet available
pub const BLOCK_UNAVAILABLE_CODES: [i64; 5] = [-32001, -32004, -32007, -32009, -32014];

/// Returns true if a JSON-RPC error code signals an absent block
pub fn is_block_unavailable_code(code: i64) -> bool {
    BLOCK_UNAVAILABLE_CODES.contains(&code)
}

/// Errors that can occur while talking to the ledger RPC endpoint.
///
/// Single-slot operations never surface these to callers; they are logged and
/// collapsed into zero-valued results. Latest-slot resolution propagates them.
///
/// # Examples
///
/// ```rust
/// use slotscan::RpcError;
///
/// let error = RpcError::BlockUnavailable {
///     slot: 100,
///     code: -32007,
///     message: "Slot 100 was skipped".to_string(),
/// };
/// assert!(error.is_block_unavailable());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The endpoint could not be reached or answered with a server error.
    #[error("RPC endpoint unavailable during {operation}")]
    Unavailable {
        /// Description of the operation that failed (e.g. "getBlock 1234")
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The call did not complete within the configured timeout.
    #[error("RPC call {operation} timed out after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    /// The ledger reported that no block exists or is retained for the slot.
    #[error("Block unavailable for slot {slot} (code {code}): {message}")]
    BlockUnavailable {
        slot: Slot,
        /// JSON-RPC error code, one of [`BLOCK_UNAVAILABLE_CODES`]
        code: i64,
        message: String,
    },

    /// The endpoint answered with a payload that could not be decoded.
    #[error("Invalid RPC response for {operation}")]
    InvalidResponse {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RpcError {
    /// Helper to create an `Unavailable` error from any error type.
    pub fn unavailable(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Unavailable {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        RpcError::Timeout {
            operation: operation.into(),
            timeout,
        }
    }

    /// Helper to create an `InvalidResponse` error from any error type.
    pub fn invalid_response(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::InvalidResponse {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// True when the error means "no block here" rather than "endpoint broken"
    pub fn is_block_unavailable(&self) -> bool {
        matches!(self, RpcError::BlockUnavailable { .. })
    }
}
