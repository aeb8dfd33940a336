// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-slot transaction counts

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

use crate::cache::{CacheKey, CacheStore, ReadThrough};
use crate::config::constants::SLOT_TTL;
use crate::errors::ScanError;
use crate::ledger::{BlockFetch, LedgerClient};
use crate::tracing::spans;
use crate::types::{Commitment, Concurrency, Slot, SlotCount};

/// Counts the transactions in the block at a slot
///
/// Never fails: a missing, skipped, pruned or unreachable block counts as
/// zero, and that zero is cached like any other count.
#[derive(Clone)]
pub struct TransactionCounter {
    ledger: Arc<dyn LedgerClient>,
    cache: ReadThrough,
    ttl: Duration,
}

impl TransactionCounter {
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

    pub async fn get_transaction_count_for_slot(&self, slot: Slot, commitment: Commitment) -> u64 {
        let span = spans::get_transaction_count(slot, commitment);
        async move {
            let key = CacheKey::tx_count(slot, commitment);
            if let Some(count) = self.cache.lookup::<u64>(&key).await {
                return count;
            }

            let count = BlockFetch::fetch(self.ledger.as_ref(), slot, commitment)
                .await
                .transaction_count();
            debug!(slot, count, "Counted block transactions");
            self.cache.store_value(key, &count, self.ttl).await;
            count
        }
        .instrument(span)
        .await
    }

    /// Counts every slot yielded by `slots`, returned in the order given
    ///
    /// Up to `concurrency` fetches run at once; output order never depends on
    /// completion order. Cancelling drops the in-flight fetches and discards
    /// whatever was collected.
    pub(crate) async fn count_slots<I>(
        &self,
        slots: I,
        commitment: Commitment,
        concurrency: Concurrency,
        cancel: &CancellationToken,
    ) -> Result<Vec<SlotCount>, ScanError>
    where
        I: IntoIterator<Item = Slot>,
    {
        let counts = stream::iter(slots)
            .map(move |slot| async move {
                SlotCount::new(
                    slot,
                    self.get_transaction_count_for_slot(slot, commitment).await,
                )
            })
            .buffered(concurrency.get())
            .collect::<Vec<_>>();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Slot scan cancelled");
                Err(ScanError::Cancelled)
            }
            counts = counts => Ok(counts),
        }
    }
}
