// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-through cached slot and transaction-count queries for a Solana-style
//! ledger.
//!
//! [`SlotScanner`] answers five questions, each backed by a pluggable
//! [`CacheStore`] in front of a [`LedgerClient`]:
//!
//! | Operation | Result |
//! |---|---|
//! | [`SlotScanner::latest_slot`] | newest slot at a commitment level |
//! | [`SlotScanner::transaction_count`] | transactions in one slot's block |
//! | [`SlotScanner::block_summary`] | block metadata for one slot |
//! | [`SlotScanner::range_counts`] | per-slot counts plus total, average, min and max |
//! | [`SlotScanner::recent_counts`] | counts for the newest slots, most recent first |
//!
//! Per-slot lookups never fail: a block that is missing, skipped, pruned or
//! unreachable counts as empty. Only latest-slot resolution surfaces ledger
//! errors. Cache failures are never surfaced.

mod cache;
mod config;
mod errors;
mod ledger;
mod scan;
mod tracing;
pub mod transport;
mod types;

pub use cache::{CacheKey, CacheStats, CacheStore, MemoryCache, NoOpCache};
pub use config::{constants, ScanConfig, ScanConfigBuilder};
pub use errors::{
    is_block_unavailable_code, CacheError, EndpointError, RpcError, ScanError, SlotscanError,
    BLOCK_UNAVAILABLE_CODES,
};
pub use ledger::{
    Block, BlockFetch, BlockRequest, HttpLedgerClient, LedgerClient, RpcEndpointConfig,
    TransactionDetails, Unavailable,
};
pub use scan::{
    normalize_range, recent_slots, RangeAggregator, RecentAggregator, SlotResolver, SlotScanner,
    SummaryBuilder, TransactionCounter,
};
pub use types::{
    BlockSummary, Commitment, Concurrency, LatestSlot, MaxRangeWidth, ParseCommitmentError,
    RangeResult, RecentLimit, Slot, SlotCount,
};
