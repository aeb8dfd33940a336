// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for cached slot scans against a scripted ledger

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use helpers::{scanner, FailingCache, MockLedger, SlotScript};
use slotscan::{
    BlockSummary, Commitment, ScanConfig, ScanConfigBuilder, ScanError, SlotCount, SlotScanner,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const CONFIRMED: Commitment = Commitment::Confirmed;

// ============================================================================
// Latest slot
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_latest_slot_is_cached_for_two_seconds() {
    let ledger = Arc::new(MockLedger::new().with_latest(1_000));
    let scanner = scanner(&ledger, &ScanConfig::default());

    assert_eq!(scanner.latest_slot(CONFIRMED).await.unwrap().slot, 1_000);

    ledger.set_latest(1_005);
    tokio::time::advance(Duration::from_millis(1_500)).await;
    assert_eq!(scanner.latest_slot(CONFIRMED).await.unwrap().slot, 1_000);
    assert_eq!(ledger.slot_calls(), 1);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(scanner.latest_slot(CONFIRMED).await.unwrap().slot, 1_005);
    assert_eq!(ledger.slot_calls(), 2);
}

#[tokio::test]
async fn test_latest_slot_failure_propagates() {
    let ledger = Arc::new(MockLedger::new());
    let scanner = scanner(&ledger, &ScanConfig::default());

    let err = scanner.latest_slot(CONFIRMED).await.unwrap_err();
    assert!(matches!(err, ScanError::Rpc(_)), "unexpected error: {err:?}");

    // Failures are not cached
    ledger.set_latest(42);
    assert_eq!(scanner.latest_slot(CONFIRMED).await.unwrap().slot, 42);
}

#[tokio::test]
async fn test_latest_slot_cached_per_commitment() {
    let ledger = Arc::new(MockLedger::new().with_latest(77));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.latest_slot(Commitment::Confirmed).await.unwrap();
    scanner.latest_slot(Commitment::Finalized).await.unwrap();
    scanner.latest_slot(Commitment::Finalized).await.unwrap();

    assert_eq!(ledger.slot_calls(), 2);
}

// ============================================================================
// Transaction counts
// ============================================================================

#[tokio::test]
async fn test_count_within_ttl_fetches_once() {
    let ledger = Arc::new(MockLedger::new().with_block(500, 12));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let first = scanner.transaction_count(500, CONFIRMED).await;
    let second = scanner.transaction_count(500, CONFIRMED).await;

    assert_eq!(first, SlotCount::new(500, 12));
    assert_eq!(first, second);
    assert_eq!(ledger.block_calls(500, CONFIRMED), 1);
}

#[tokio::test(start_paused = true)]
async fn test_count_refetched_after_ttl() {
    let ledger = Arc::new(MockLedger::new().with_block(500, 12));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.transaction_count(500, CONFIRMED).await;
    tokio::time::advance(Duration::from_secs(10)).await;
    scanner.transaction_count(500, CONFIRMED).await;

    assert_eq!(ledger.block_calls(500, CONFIRMED), 2);
}

#[tokio::test]
async fn test_fetch_failures_count_as_zero() {
    let ledger = Arc::new(
        MockLedger::new()
            .with_script(1, SlotScript::Skipped)
            .with_script(2, SlotScript::Unreachable)
            .with_script(3, SlotScript::Null),
    );
    let scanner = scanner(&ledger, &ScanConfig::default());

    for slot in 1..=3 {
        assert_eq!(scanner.transaction_count(slot, CONFIRMED).await.transaction_count, 0);
    }
}

#[tokio::test]
async fn test_zero_counts_are_cached() {
    let ledger = Arc::new(MockLedger::new().with_script(9, SlotScript::Unreachable));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.transaction_count(9, CONFIRMED).await;
    scanner.transaction_count(9, CONFIRMED).await;

    assert_eq!(ledger.block_calls(9, CONFIRMED), 1);
}

#[tokio::test]
async fn test_counts_cached_per_commitment() {
    let ledger = Arc::new(MockLedger::new().with_block(5, 1));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.transaction_count(5, Commitment::Confirmed).await;
    scanner.transaction_count(5, Commitment::Finalized).await;

    assert_eq!(ledger.block_calls(5, Commitment::Confirmed), 1);
    assert_eq!(ledger.block_calls(5, Commitment::Finalized), 1);
}

// ============================================================================
// Block summaries
// ============================================================================

#[tokio::test]
async fn test_summary_keeps_block_metadata() {
    let ledger = Arc::new(MockLedger::new().with_block(300, 4));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let summary = scanner.block_summary(300, CONFIRMED).await;

    assert_eq!(summary.slot, 300);
    assert_eq!(summary.transaction_count, 4);
    assert_eq!(summary.blockhash.as_deref(), Some("hash-300"));
    assert_eq!(summary.parent_slot, Some(299));
    assert_eq!(summary.block_time, Some(1_700_000_300));
}

#[tokio::test]
async fn test_unavailable_summary_defaults_are_cached() {
    let ledger = Arc::new(
        MockLedger::new()
            .with_script(7, SlotScript::Skipped)
            .with_script(8, SlotScript::Null),
    );
    let scanner = scanner(&ledger, &ScanConfig::default());

    for slot in [7, 8] {
        let first = scanner.block_summary(slot, CONFIRMED).await;
        let second = scanner.block_summary(slot, CONFIRMED).await;

        assert_eq!(first, BlockSummary::unavailable(slot));
        assert_eq!(second, first);
        assert_eq!(ledger.block_calls(slot, CONFIRMED), 1);
    }

    let json = serde_json::to_value(scanner.block_summary(7, CONFIRMED).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"slot": 7, "transactionCount": 0, "blockTime": null})
    );
}

#[tokio::test]
async fn test_summary_and_count_use_separate_entries() {
    let ledger = Arc::new(MockLedger::new().with_block(40, 2));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.transaction_count(40, CONFIRMED).await;
    scanner.block_summary(40, CONFIRMED).await;

    assert_eq!(ledger.block_calls(40, CONFIRMED), 2);
}

// ============================================================================
// Range counts
// ============================================================================

#[tokio::test]
async fn test_range_reversed_bounds_are_normalized() {
    let ledger = Arc::new(MockLedger::new().with_counts(10, &[1; 41]));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let reversed = scanner.range_counts(50, 10, CONFIRMED).await.unwrap();
    let ordered = scanner.range_counts(10, 50, CONFIRMED).await.unwrap();

    assert_eq!(reversed.start, 10);
    assert_eq!(reversed.end, 50);
    assert_eq!(reversed, ordered);
}

#[tokio::test]
async fn test_range_invariants() {
    let counts = [5, 0, 9, 3, 3, 1];
    let ledger = Arc::new(MockLedger::new().with_counts(100, &counts));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let range = scanner.range_counts(100, 105, CONFIRMED).await.unwrap();

    assert_eq!(range.len(), 6);
    assert_eq!(range.total, 21);
    assert_eq!(range.average, 3.5);
    let slots: Vec<u64> = range.slots.iter().map(|s| s.slot).collect();
    assert_eq!(slots, (100..=105).collect::<Vec<_>>());
    assert_eq!(range.min, Some(SlotCount::new(101, 0)));
    assert_eq!(range.max, Some(SlotCount::new(102, 9)));
}

#[tokio::test]
async fn test_range_max_tie_goes_to_earliest_slot() {
    let ledger = Arc::new(MockLedger::new().with_counts(10, &[3, 7, 7, 2]));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let range = scanner.range_counts(10, 13, CONFIRMED).await.unwrap();

    assert_eq!(range.max, Some(SlotCount::new(11, 7)));
    assert_eq!(range.min, Some(SlotCount::new(13, 2)));
}

#[tokio::test]
async fn test_range_negative_bounds_floor_at_zero() {
    let ledger = Arc::new(MockLedger::new().with_counts(0, &[1, 2, 3]));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let range = scanner.range_counts(-5, 2, CONFIRMED).await.unwrap();
    assert_eq!((range.start, range.end), (0, 2));
    assert_eq!(range.total, 6);

    let single = scanner.range_counts(-9, -1, CONFIRMED).await.unwrap();
    assert_eq!((single.start, single.end), (0, 0));
    assert_eq!(single.len(), 1);
}

#[tokio::test]
async fn test_range_failed_slots_count_as_zero() {
    let ledger = Arc::new(
        MockLedger::new()
            .with_counts(20, &[4, 0, 6])
            .with_script(21, SlotScript::Unreachable),
    );
    let scanner = scanner(&ledger, &ScanConfig::default());

    let range = scanner.range_counts(20, 22, CONFIRMED).await.unwrap();

    assert_eq!(range.total, 10);
    assert_eq!(range.min, Some(SlotCount::new(21, 0)));
}

#[tokio::test]
async fn test_range_too_wide_is_rejected_before_fetching() {
    let ledger = Arc::new(MockLedger::new());
    let config = ScanConfigBuilder::new().max_range_width(5).build();
    let scanner = scanner(&ledger, &config);

    let err = scanner.range_counts(0, 10, CONFIRMED).await.unwrap_err();
    assert!(matches!(
        err,
        ScanError::RangeTooWide {
            requested: 11,
            max: 5
        }
    ));
    assert_eq!(ledger.total_block_calls(), 0);

    assert!(scanner.range_counts(0, 4, CONFIRMED).await.is_ok());
}

#[tokio::test]
async fn test_unbounded_range_accepts_wide_requests() {
    let ledger = Arc::new(MockLedger::new());
    let scanner = scanner(&ledger, &ScanConfig::minimal());

    let range = scanner.range_counts(0, 10_500, CONFIRMED).await.unwrap();
    assert_eq!(range.len(), 10_501);
    assert_eq!(range.total, 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_range_preserves_slot_order() {
    // Later slots finish first
    let ledger = Arc::new(
        MockLedger::new()
            .with_counts(10, &[3, 7, 7, 2])
            .with_delay(10, Duration::from_millis(400))
            .with_delay(11, Duration::from_millis(300))
            .with_delay(12, Duration::from_millis(200))
            .with_delay(13, Duration::from_millis(100)),
    );
    let config = ScanConfigBuilder::new().concurrency(4).build();
    let scanner = scanner(&ledger, &config);

    let start = Instant::now();
    let range = scanner.range_counts(10, 13, CONFIRMED).await.unwrap();
    let elapsed = start.elapsed();

    let slots: Vec<u64> = range.slots.iter().map(|s| s.slot).collect();
    assert_eq!(slots, vec![10, 11, 12, 13]);
    assert_eq!(range.max, Some(SlotCount::new(11, 7)));
    assert!(elapsed < Duration::from_millis(1_000), "ran sequentially: {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_range_cancellation_discards_results() {
    let ledger = Arc::new(
        MockLedger::new()
            .with_counts(0, &[1; 10])
            .with_default_delay(Duration::from_secs(1)),
    );
    let scanner = scanner(&ledger, &ScanConfig::default());
    let cancel = CancellationToken::new();

    let (result, ()) = tokio::join!(
        scanner.range_counts_with_cancel(0, 9, CONFIRMED, &cancel),
        async {
            tokio::time::sleep(Duration::from_millis(2_500)).await;
            cancel.cancel();
        }
    );

    assert!(matches!(result, Err(ScanError::Cancelled)));
    assert!(ledger.total_block_calls() < 10);
}

#[tokio::test]
async fn test_cancelled_token_skips_all_fetches() {
    let ledger = Arc::new(MockLedger::new().with_latest(100));
    let scanner = scanner(&ledger, &ScanConfig::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let range = scanner.range_counts_with_cancel(0, 9, CONFIRMED, &cancel).await;
    let recent = scanner.recent_counts_with_cancel(5, CONFIRMED, &cancel).await;

    assert!(matches!(range, Err(ScanError::Cancelled)));
    assert!(matches!(recent, Err(ScanError::Cancelled)));
    assert_eq!(ledger.total_block_calls(), 0);
    assert_eq!(ledger.slot_calls(), 0);
}

// ============================================================================
// Recent counts
// ============================================================================

#[tokio::test]
async fn test_recent_counts_newest_first() {
    let ledger = Arc::new(MockLedger::new().with_latest(1_002).with_counts(1_000, &[1, 2, 3]));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let recent = scanner.recent_counts(3, CONFIRMED).await.unwrap();

    assert_eq!(
        recent,
        vec![
            SlotCount::new(1_002, 3),
            SlotCount::new(1_001, 2),
            SlotCount::new(1_000, 1),
        ]
    );
}

#[tokio::test]
async fn test_recent_limit_is_clamped() {
    let ledger = Arc::new(MockLedger::new().with_latest(10_000));
    let scanner = scanner(&ledger, &ScanConfig::default());

    assert_eq!(scanner.recent_counts(500, CONFIRMED).await.unwrap().len(), 200);
    assert_eq!(scanner.recent_counts(0, CONFIRMED).await.unwrap().len(), 1);
    assert_eq!(scanner.recent_counts(-5, CONFIRMED).await.unwrap().len(), 1);
    assert_eq!(scanner.recent_counts(12.9, CONFIRMED).await.unwrap().len(), 12);
}

#[tokio::test]
async fn test_recent_stops_at_genesis() {
    let ledger = Arc::new(MockLedger::new().with_latest(3));
    let scanner = scanner(&ledger, &ScanConfig::default());

    let slots: Vec<u64> = scanner
        .recent_counts(10, CONFIRMED)
        .await
        .unwrap()
        .iter()
        .map(|s| s.slot)
        .collect();

    assert_eq!(slots, vec![3, 2, 1, 0]);
}

#[tokio::test]
async fn test_recent_fails_when_latest_slot_unavailable() {
    let ledger = Arc::new(MockLedger::new());
    let scanner = scanner(&ledger, &ScanConfig::default());

    let err = scanner.recent_counts(5, CONFIRMED).await.unwrap_err();
    assert!(matches!(err, ScanError::Rpc(_)));
    assert_eq!(ledger.total_block_calls(), 0);
}

// ============================================================================
// Cache backends
// ============================================================================

#[tokio::test]
async fn test_failing_cache_falls_through_to_ledger() {
    let ledger = Arc::new(MockLedger::new().with_latest(64).with_block(64, 8));
    let cache = Arc::new(FailingCache::default());
    let scanner = SlotScanner::new(ledger.clone(), cache.clone(), &ScanConfig::default());

    assert_eq!(scanner.latest_slot(CONFIRMED).await.unwrap().slot, 64);
    assert_eq!(scanner.transaction_count(64, CONFIRMED).await.transaction_count, 8);
    assert_eq!(scanner.transaction_count(64, CONFIRMED).await.transaction_count, 8);
    assert_eq!(scanner.block_summary(64, CONFIRMED).await.transaction_count, 8);

    assert_eq!(ledger.block_calls(64, CONFIRMED), 3);
    assert_eq!(cache.gets.load(Ordering::SeqCst), 4);
    assert_eq!(cache.sets.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_without_cache_always_fetches() {
    let ledger = Arc::new(MockLedger::new().with_block(1, 1));
    let scanner = SlotScanner::without_cache(ledger.clone(), &ScanConfig::default());

    scanner.transaction_count(1, CONFIRMED).await;
    scanner.transaction_count(1, CONFIRMED).await;

    assert_eq!(ledger.block_calls(1, CONFIRMED), 2);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_range_scans_do_not_accumulate_stale_entries() {
    let ledger = Arc::new(MockLedger::new());
    let config = ScanConfig::default();
    let scanner = scanner(&ledger, &config);

    for round in 0..5_i64 {
        let start = round * 1_000;
        let result = scanner
            .range_counts(start, start + 999, CONFIRMED)
            .await
            .unwrap();
        assert_eq!(result.slots.len(), 1_000);
        tokio::time::advance(config.slot_ttl).await;
    }

    let stats = scanner.cache_stats().await;
    assert_eq!(stats.entries, 1_000);
    assert_eq!(stats.expirations, 4_000);
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let ledger = Arc::new(MockLedger::new().with_block(1, 1));
    let scanner = scanner(&ledger, &ScanConfig::default());

    scanner.transaction_count(1, CONFIRMED).await;
    scanner.transaction_count(1, CONFIRMED).await;

    let stats = scanner.cache_stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);

    scanner.clear_cache().await.unwrap();
    scanner.transaction_count(1, CONFIRMED).await;
    assert_eq!(ledger.block_calls(1, CONFIRMED), 2);
}
