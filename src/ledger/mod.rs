// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ledger access
//!
//! This module defines the [`LedgerClient`] seam the scan components read
//! through, and provides:
//!
//! - [`HttpLedgerClient`]: JSON-RPC client for a remote ledger node
//! - [`RpcEndpointConfig`]: endpoint URL, throttling and timeout settings
//! - [`BlockFetch`]: the outcome of a per-slot block fetch with failures
//!   collapsed into an explicit "unavailable" case

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::RpcError;
use crate::types::{Commitment, Slot};

mod config;
mod fetch;
mod http;

pub use config::RpcEndpointConfig;
pub use fetch::{BlockFetch, Unavailable};
pub use http::HttpLedgerClient;

/// Level of transaction detail requested with a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionDetails {
    #[default]
    Full,
    Signatures,
    None,
}

/// Options sent with every block request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub max_supported_transaction_version: u8,
    pub transaction_details: TransactionDetails,
    pub commitment: Commitment,
}

impl BlockRequest {
    /// Full transaction details with versioned transactions accepted
    pub fn full(commitment: Commitment) -> Self {
        Self {
            max_supported_transaction_version: 0,
            transaction_details: TransactionDetails::Full,
            commitment,
        }
    }
}

/// Block data as returned by the ledger
///
/// Transactions are kept opaque: only their number matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<serde_json::Value>,
    #[serde(default)]
    pub blockhash: Option<String>,
    #[serde(default)]
    pub parent_slot: Option<Slot>,
    #[serde(default)]
    pub block_time: Option<i64>,
}

impl Block {
    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Read-only access to a remote ledger
///
/// Implementations must be safe to share across tasks; calls are independent
/// and side-effect free on the remote system.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Returns the newest slot the node has reached at the given commitment
    async fn get_slot(&self, commitment: Commitment) -> Result<Slot, RpcError>;

    /// Fetches the block at `slot`
    ///
    /// Returns `Ok(None)` when the node answers with no block. Absence may
    /// also be reported as [`RpcError::BlockUnavailable`].
    async fn get_block(&self, slot: Slot, request: BlockRequest)
        -> Result<Option<Block>, RpcError>;

    /// Returns a human-readable name for this client, used in logs
    fn name(&self) -> &'static str;
}
