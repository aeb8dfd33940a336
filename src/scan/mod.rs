// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached slot and transaction-count queries
//!
//! Each component reads through the injected [`CacheStore`] and falls back to
//! the [`LedgerClient`] on a miss:
//!
//! - [`SlotResolver`]: latest slot at a commitment level
//! - [`TransactionCounter`]: transaction count at one slot, zero when unavailable
//! - [`SummaryBuilder`]: block metadata at one slot, defaults when unavailable
//! - [`RangeAggregator`]: per-slot counts with total, average, min and max
//! - [`RecentAggregator`]: counts for the newest slots
//!
//! [`SlotScanner`] wires all five from a single [`ScanConfig`].

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cache::{CacheStats, CacheStore, MemoryCache, NoOpCache};
use crate::config::ScanConfig;
use crate::errors::{CacheError, ScanError};
use crate::ledger::LedgerClient;
use crate::types::{
    BlockSummary, Commitment, LatestSlot, RangeResult, RecentLimit, Slot, SlotCount,
};

mod count;
mod range;
mod recent;
mod slot;
mod summary;

pub use count::TransactionCounter;
pub use range::{normalize_range, RangeAggregator};
pub use recent::{recent_slots, RecentAggregator};
pub use slot::SlotResolver;
pub use summary::SummaryBuilder;

/// All scan operations over one ledger and one cache
///
/// # Example
///
/// ```rust,no_run
/// use slotscan::{Commitment, HttpLedgerClient, ScanConfig, SlotScanner};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = Arc::new(HttpLedgerClient::from_env()?);
/// let scanner = SlotScanner::with_memory_cache(ledger, &ScanConfig::default());
///
/// let latest = scanner.latest_slot(Commitment::Confirmed).await?;
/// let range = scanner
///     .range_counts(latest.slot as i64 - 9, latest.slot as i64, Commitment::Confirmed)
///     .await?;
/// println!("{} transactions in the last 10 slots", range.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SlotScanner {
    resolver: SlotResolver,
    counter: TransactionCounter,
    summaries: SummaryBuilder,
    range: RangeAggregator,
    recent: RecentAggregator,
    cache: Arc<dyn CacheStore>,
}

impl SlotScanner {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        cache: Arc<dyn CacheStore>,
        config: &ScanConfig,
    ) -> Self {
        let resolver = SlotResolver::new(ledger.clone(), cache.clone())
            .with_ttl(config.latest_slot_ttl);
        let counter =
            TransactionCounter::new(ledger.clone(), cache.clone()).with_ttl(config.slot_ttl);
        let summaries = SummaryBuilder::new(ledger, cache.clone()).with_ttl(config.slot_ttl);
        let range = RangeAggregator::new(counter.clone())
            .with_concurrency(config.concurrency)
            .with_max_width(config.max_range_width);
        let recent = RecentAggregator::new(resolver.clone(), counter.clone())
            .with_concurrency(config.concurrency);

        Self {
            resolver,
            counter,
            summaries,
            range,
            recent,
            cache,
        }
    }

    /// Scanner backed by an unbounded [`MemoryCache`]
    pub fn with_memory_cache(ledger: Arc<dyn LedgerClient>, config: &ScanConfig) -> Self {
        Self::new(ledger, Arc::new(MemoryCache::new()), config)
    }

    /// Scanner that always goes to the ledger
    pub fn without_cache(ledger: Arc<dyn LedgerClient>, config: &ScanConfig) -> Self {
        Self::new(ledger, Arc::new(NoOpCache), config)
    }

    pub async fn latest_slot(&self, commitment: Commitment) -> Result<LatestSlot, ScanError> {
        let slot = self.resolver.get_latest_slot(commitment).await?;
        Ok(LatestSlot { slot })
    }

    pub async fn transaction_count(&self, slot: Slot, commitment: Commitment) -> SlotCount {
        let count = self
            .counter
            .get_transaction_count_for_slot(slot, commitment)
            .await;
        SlotCount::new(slot, count)
    }

    pub async fn block_summary(&self, slot: Slot, commitment: Commitment) -> BlockSummary {
        self.summaries.get_block_summary(slot, commitment).await
    }

    /// Counts over the inclusive range between `start` and `end`, in either
    /// order, with negative bounds floored at zero
    pub async fn range_counts(
        &self,
        start: i64,
        end: i64,
        commitment: Commitment,
    ) -> Result<RangeResult, ScanError> {
        self.range.get_range_counts(start, end, commitment).await
    }

    pub async fn range_counts_with_cancel(
        &self,
        start: i64,
        end: i64,
        commitment: Commitment,
        cancel: &CancellationToken,
    ) -> Result<RangeResult, ScanError> {
        self.range
            .get_range_counts_with_cancel(start, end, commitment, cancel)
            .await
    }

    /// Counts for up to `limit` newest slots, most recent first
    ///
    /// `limit` is clamped to `1..=200`; see [`RecentLimit`].
    pub async fn recent_counts(
        &self,
        limit: impl Into<RecentLimit>,
        commitment: Commitment,
    ) -> Result<Vec<SlotCount>, ScanError> {
        self.recent
            .get_recent_counts(limit.into(), commitment)
            .await
    }

    pub async fn recent_counts_with_cancel(
        &self,
        limit: impl Into<RecentLimit>,
        commitment: Commitment,
        cancel: &CancellationToken,
    ) -> Result<Vec<SlotCount>, ScanError> {
        self.recent
            .get_recent_counts_with_cancel(limit.into(), commitment, cancel)
            .await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear_cache(&self) -> Result<(), CacheError> {
        self.cache.clear().await
    }
}
