// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by every slotscan operation.
//!
//! All serialized shapes use camelCase field names so cached values and CLI
//! output match what JSON consumers of the ledger already expect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod config;

pub use config::{Concurrency, MaxRangeWidth, RecentLimit};

/// Index of a block position on the ledger
pub type Slot = u64;

/// Finality qualifier for a ledger read
///
/// Part of every cache key that touches block state, so the same slot read at
/// two commitment levels never shares an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Voted on by a supermajority; may still be rolled back in rare cases
    #[default]
    Confirmed,
    /// Rooted; irreversible
    Finalized,
}

impl Commitment {
    /// Wire name used in RPC parameters and cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognised commitment level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid commitment level '{0}' (expected 'confirmed' or 'finalized')")]
pub struct ParseCommitmentError(pub String);

impl FromStr for Commitment {
    type Err = ParseCommitmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(ParseCommitmentError(other.to_string())),
        }
    }
}

/// Response shape for the latest-slot query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSlot {
    pub slot: Slot,
}

/// Transaction count observed at a single slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCount {
    pub slot: Slot,
    pub transaction_count: u64,
}

impl SlotCount {
    pub fn new(slot: Slot, transaction_count: u64) -> Self {
        Self {
            slot,
            transaction_count,
        }
    }
}

/// Transaction count plus block metadata for a single slot
///
/// Metadata fields are `None` when the block could not be fetched. A block
/// that exists but carries no timestamp keeps `block_time` as `None` too, which
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub slot: Slot,
    pub transaction_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockhash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_slot: Option<Slot>,
    #[serde(default)]
    pub block_time: Option<i64>,
}

impl BlockSummary {
    /// Summary reported for a slot whose block could not be retrieved
    pub fn unavailable(slot: Slot) -> Self {
        Self {
            slot,
            transaction_count: 0,
            blockhash: None,
            parent_slot: None,
            block_time: None,
        }
    }
}

/// Aggregate statistics over an inclusive slot range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeResult {
    pub start: Slot,
    pub end: Slot,
    /// Per-slot counts, ascending by slot
    pub slots: Vec<SlotCount>,
    pub total: u64,
    pub average: f64,
    pub min: Option<SlotCount>,
    pub max: Option<SlotCount>,
}

impl RangeResult {
    /// Number of slots in the range (inclusive)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_round_trips_through_str() {
        for commitment in [Commitment::Confirmed, Commitment::Finalized] {
            assert_eq!(commitment.as_str().parse::<Commitment>(), Ok(commitment));
        }
    }

    #[test]
    fn commitment_rejects_unknown_levels() {
        let err = "processed".parse::<Commitment>().unwrap_err();
        assert_eq!(err, ParseCommitmentError("processed".to_string()));
        assert!(err.to_string().contains("processed"));
    }

    #[test]
    fn commitment_defaults_to_confirmed() {
        assert_eq!(Commitment::default(), Commitment::Confirmed);
    }

    #[test]
    fn slot_count_serializes_camel_case() {
        let json = serde_json::to_value(SlotCount::new(42, 7)).unwrap();
        assert_eq!(json, serde_json::json!({"slot": 42, "transactionCount": 7}));
    }

    #[test]
    fn unavailable_summary_omits_metadata() {
        let json = serde_json::to_value(BlockSummary::unavailable(9)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"slot": 9, "transactionCount": 0, "blockTime": null})
        );

        // Missing fields decode back to the same summary
        let decoded: BlockSummary =
            serde_json::from_value(serde_json::json!({"slot": 9, "transactionCount": 0}))
                .unwrap();
        assert_eq!(decoded, BlockSummary::unavailable(9));
    }
}
