// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fail-to-zero block fetching
//!
//! Per-slot lookups must always produce a value. [`BlockFetch::fetch`] runs the
//! ledger call and folds every way it can come back empty (a `null` block, a
//! skipped or pruned slot, an unreachable endpoint) into
//! [`BlockFetch::Unavailable`]. The zero-valued results for each operation are
//! defined here in one place.

use tracing::{debug, warn, Instrument};

use super::{Block, BlockRequest, LedgerClient};
use crate::errors::RpcError;
use crate::tracing::spans;
use crate::types::{BlockSummary, Commitment, Slot};

/// Why no block was obtained for a slot
#[derive(Debug)]
pub enum Unavailable {
    /// The ledger answered with no block
    Missing,
    /// The fetch failed; the error is kept for logging only
    Failed(RpcError),
}

/// Outcome of fetching the block at one slot
#[derive(Debug)]
pub enum BlockFetch {
    Available(Block),
    Unavailable(Unavailable),
}

impl BlockFetch {
    /// Fetch the full block at `slot`, never failing
    pub async fn fetch(ledger: &dyn LedgerClient, slot: Slot, commitment: Commitment) -> Self {
        let span = spans::fetch_block(slot, commitment);
        async move {
            match ledger.get_block(slot, BlockRequest::full(commitment)).await {
                Ok(Some(block)) => BlockFetch::Available(block),
                Ok(None) => {
                    debug!(slot, %commitment, "Ledger returned no block");
                    BlockFetch::Unavailable(Unavailable::Missing)
                }
                Err(e) if e.is_block_unavailable() => {
                    debug!(slot, %commitment, error = %e, "Block unavailable, counting as empty");
                    BlockFetch::Unavailable(Unavailable::Failed(e))
                }
                Err(e) => {
                    warn!(
                        slot,
                        %commitment,
                        client = ledger.name(),
                        error = %e,
                        "Block fetch failed, counting as empty"
                    );
                    BlockFetch::Unavailable(Unavailable::Failed(e))
                }
            }
        }
        .instrument(span)
        .await
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BlockFetch::Available(_))
    }

    /// Number of transactions in the block, zero when unavailable
    pub fn transaction_count(&self) -> u64 {
        match self {
            BlockFetch::Available(block) => block.transaction_count(),
            BlockFetch::Unavailable(_) => 0,
        }
    }

    /// Summary of the block, or the all-defaults summary when unavailable
    pub fn into_summary(self, slot: Slot) -> BlockSummary {
        match self {
            BlockFetch::Available(block) => BlockSummary {
                slot,
                transaction_count: block.transaction_count(),
                blockhash: block.blockhash,
                parent_slot: block.parent_slot,
                block_time: block.block_time,
            },
            BlockFetch::Unavailable(_) => BlockSummary::unavailable(slot),
        }
    }
}
