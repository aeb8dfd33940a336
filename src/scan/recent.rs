// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction counts for the most recent slots

use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};

use super::{SlotResolver, TransactionCounter};
use crate::errors::ScanError;
use crate::tracing::spans;
use crate::types::{Commitment, Concurrency, RecentLimit, Slot, SlotCount};

/// Slots to scan walking back from `latest`, newest first
///
/// Stops at slot zero, so a young ledger yields fewer than `limit` slots.
pub fn recent_slots(latest: Slot, limit: RecentLimit) -> impl Iterator<Item = Slot> {
    (0..limit.get()).map_while(move |offset| latest.checked_sub(offset))
}

/// Collects counts for the newest slots, most recent first
#[derive(Clone)]
pub struct RecentAggregator {
    resolver: SlotResolver,
    counter: TransactionCounter,
    concurrency: Concurrency,
}

impl RecentAggregator {
    pub fn new(resolver: SlotResolver, counter: TransactionCounter) -> Self {
        Self {
            resolver,
            counter,
            concurrency: Concurrency::SEQUENTIAL,
        }
    }

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Fails only if the latest slot cannot be resolved
    pub async fn get_recent_counts(
        &self,
        limit: RecentLimit,
        commitment: Commitment,
    ) -> Result<Vec<SlotCount>, ScanError> {
        self.get_recent_counts_with_cancel(limit, commitment, &CancellationToken::new())
            .await
    }

    pub async fn get_recent_counts_with_cancel(
        &self,
        limit: RecentLimit,
        commitment: Commitment,
        cancel: &CancellationToken,
    ) -> Result<Vec<SlotCount>, ScanError> {
        let span = spans::get_recent_counts(limit.get(), commitment);
        async move {
            let latest = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ScanError::Cancelled),
                latest = self.resolver.get_latest_slot(commitment) => latest?,
            };

            let counts = self
                .counter
                .count_slots(recent_slots(latest, limit), commitment, self.concurrency, cancel)
                .await?;
            info!(latest, slots = counts.len(), "Collected recent counts");
            Ok(counts)
        }
        .instrument(span)
        .await
    }
}
