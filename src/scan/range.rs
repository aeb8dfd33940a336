// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction counts aggregated over an inclusive slot range

use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};

use super::TransactionCounter;
use crate::errors::ScanError;
use crate::tracing::spans;
use crate::types::{Commitment, Concurrency, MaxRangeWidth, RangeResult, Slot, SlotCount};

/// Orders the bounds and floors both at slot zero
///
/// Inputs are signed so callers can pass unvalidated values straight through;
/// `(50, 10)` and `(10, 50)` name the same range.
pub fn normalize_range(start: i64, end: i64) -> (Slot, Slot) {
    let low = start.min(end).max(0) as Slot;
    let high = start.max(end).max(0) as Slot;
    (low, high)
}

/// Folds per-slot counts, in slot order, into a [`RangeResult`]
///
/// Min and max only move on a strictly smaller or larger count, so the
/// earliest slot wins a tie.
#[derive(Debug, Default)]
pub(crate) struct RangeAccumulator {
    slots: Vec<SlotCount>,
    total: u64,
    min: Option<SlotCount>,
    max: Option<SlotCount>,
}

impl RangeAccumulator {
    pub(crate) fn push(&mut self, item: SlotCount) {
        self.total = self.total.saturating_add(item.transaction_count);
        if self
            .min
            .is_none_or(|min| item.transaction_count < min.transaction_count)
        {
            self.min = Some(item);
        }
        if self
            .max
            .is_none_or(|max| item.transaction_count > max.transaction_count)
        {
            self.max = Some(item);
        }
        self.slots.push(item);
    }

    pub(crate) fn finish(self, start: Slot, end: Slot) -> RangeResult {
        let average = if self.slots.is_empty() {
            0.0
        } else {
            self.total as f64 / self.slots.len() as f64
        };
        RangeResult {
            start,
            end,
            slots: self.slots,
            total: self.total,
            average,
            min: self.min,
            max: self.max,
        }
    }
}

impl Extend<SlotCount> for RangeAccumulator {
    fn extend<T: IntoIterator<Item = SlotCount>>(&mut self, iter: T) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Aggregates per-slot transaction counts over a slot range
#[derive(Clone)]
pub struct RangeAggregator {
    counter: TransactionCounter,
    concurrency: Concurrency,
    max_width: Option<MaxRangeWidth>,
}

impl RangeAggregator {
    /// Sequential scans capped at [`MaxRangeWidth::DEFAULT`] slots
    pub fn new(counter: TransactionCounter) -> Self {
        Self {
            counter,
            concurrency: Concurrency::SEQUENTIAL,
            max_width: Some(MaxRangeWidth::DEFAULT),
        }
    }

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the widest range accepted; `None` accepts any width
    pub fn with_max_width(mut self, max_width: Option<MaxRangeWidth>) -> Self {
        self.max_width = max_width;
        self
    }

    pub async fn get_range_counts(
        &self,
        start: i64,
        end: i64,
        commitment: Commitment,
    ) -> Result<RangeResult, ScanError> {
        self.get_range_counts_with_cancel(start, end, commitment, &CancellationToken::new())
            .await
    }

    /// Like [`get_range_counts`](Self::get_range_counts), aborting with
    /// [`ScanError::Cancelled`] once `cancel` fires
    pub async fn get_range_counts_with_cancel(
        &self,
        start: i64,
        end: i64,
        commitment: Commitment,
        cancel: &CancellationToken,
    ) -> Result<RangeResult, ScanError> {
        let (start, end) = normalize_range(start, end);
        let span = spans::get_range_counts(start, end, commitment);

        async move {
            let width = (end - start).saturating_add(1);
            if let Some(max) = self.max_width {
                if !max.allows(width) {
                    return Err(ScanError::range_too_wide(width, max.as_u64()));
                }
            }

            let counts = self
                .counter
                .count_slots(start..=end, commitment, self.concurrency, cancel)
                .await?;

            let mut acc = RangeAccumulator::default();
            acc.extend(counts);
            let result = acc.finish(start, end);
            info!(
                slots = result.len(),
                total = result.total,
                "Aggregated range counts"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
