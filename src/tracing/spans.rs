// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for slotscan operations.
//!
//! Each instrumented operation has a matching helper here instead of an
//! `#[instrument]` attribute, keeping telemetry fields out of business logic.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, slot: Slot) -> T {
//!     let span = spans::my_operation(slot);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::types::{Commitment, Slot};

/// Create span for fetching the full block at one slot.
///
/// Parent: get_transaction_count or get_block_summary span
/// Children: slotscan.rpc span from the transport layer
#[inline]
pub(crate) fn fetch_block(slot: Slot, commitment: Commitment) -> Span {
    tracing::trace_span!("slotscan.fetch_block", slot = slot, commitment = %commitment)
}

/// Create span for resolving the latest slot.
///
/// Parent: None, or get_recent_counts span
/// Children: slotscan.rpc span on cache miss
#[inline]
pub(crate) fn get_latest_slot(commitment: Commitment) -> Span {
    tracing::debug_span!("slotscan.get_latest_slot", commitment = %commitment)
}

/// Create span for counting transactions at one slot.
///
/// Parent: None, or a range/recent scan span
/// Children: fetch_block span on cache miss
#[inline]
pub(crate) fn get_transaction_count(slot: Slot, commitment: Commitment) -> Span {
    tracing::debug_span!(
        "slotscan.get_transaction_count",
        slot = slot,
        commitment = %commitment,
    )
}

/// Create span for summarizing the block at one slot.
///
/// Parent: None (root span for this operation)
/// Children: fetch_block span on cache miss
#[inline]
pub(crate) fn get_block_summary(slot: Slot, commitment: Commitment) -> Span {
    tracing::debug_span!(
        "slotscan.get_block_summary",
        slot = slot,
        commitment = %commitment,
    )
}

/// Create span for aggregating counts over an inclusive slot range.
///
/// Parent: None (root span for this operation)
/// Children: get_transaction_count spans (one per slot)
#[inline]
pub(crate) fn get_range_counts(start: Slot, end: Slot, commitment: Commitment) -> Span {
    tracing::span!(
        Level::INFO,
        "slotscan.get_range_counts",
        start = start,
        end = end,
        commitment = %commitment,
    )
}

/// Create span for collecting counts for the most recent slots.
///
/// Parent: None (root span for this operation)
/// Children: get_latest_slot span, then get_transaction_count spans
#[inline]
pub(crate) fn get_recent_counts(limit: u64, commitment: Commitment) -> Span {
    tracing::span!(
        Level::INFO,
        "slotscan.get_recent_counts",
        limit = limit,
        commitment = %commitment,
    )
}
