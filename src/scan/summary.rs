// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-slot block summaries

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::cache::{CacheKey, CacheStore, ReadThrough};
use crate::config::constants::SLOT_TTL;
use crate::ledger::{BlockFetch, LedgerClient};
use crate::tracing::spans;
use crate::types::{BlockSummary, Commitment, Slot};

/// Builds a [`BlockSummary`] for a slot
///
/// Shares the fetch path of
/// [`TransactionCounter`](crate::TransactionCounter) but keeps the block
/// metadata. A block that cannot be retrieved yields
/// [`BlockSummary::unavailable`], which is cached as-is.
#[derive(Clone)]
pub struct SummaryBuilder {
    ledger: Arc<dyn LedgerClient>,
    cache: ReadThrough,
    ttl: Duration,
}

impl SummaryBuilder {
    pub fn new(ledger: Arc<dyn LedgerClient>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            ledger,
            cache: ReadThrough::new(cache),
            ttl: SLOT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn get_block_summary(&self, slot: Slot, commitment: Commitment) -> BlockSummary {
        let span = spans::get_block_summary(slot, commitment);
        async move {
            let key = CacheKey::block_summary(slot, commitment);
            if let Some(summary) = self.cache.lookup::<BlockSummary>(&key).await {
                return summary;
            }

            let summary = BlockFetch::fetch(self.ledger.as_ref(), slot, commitment)
                .await
                .into_summary(slot);
            self.cache.store_value(key, &summary, self.ttl).await;
            summary
        }
        .instrument(span)
        .await
    }
}
