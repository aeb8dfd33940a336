// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for slotscan integration tests
//!
//! Provides mock implementations of the ledger and cache seams so scans can be
//! exercised without a real RPC node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use slotscan::{
    Block, BlockRequest, CacheError, CacheKey, CacheStats, CacheStore, Commitment, LedgerClient,
    RpcError, ScanConfig, Slot, SlotScanner,
};

/// What the mock ledger answers for one slot
#[derive(Debug, Clone)]
pub enum SlotScript {
    Block(Block),
    /// The node answers `null`
    Null,
    /// The node reports the slot as skipped
    Skipped,
    /// The request never gets an answer
    Unreachable,
}

/// Scripted [`LedgerClient`]
///
/// Unscripted slots answer `null`. Every call is counted so tests can assert
/// on cache behaviour.
///
/// # Example
///
/// ```rust,ignore
/// let ledger = MockLedger::new()
///     .with_latest(1_000)
///     .with_counts(10, &[3, 7, 7, 2])
///     .with_script(14, SlotScript::Skipped);
/// ```
#[derive(Default)]
pub struct MockLedger {
    latest: Mutex<Option<Slot>>,
    scripts: HashMap<Slot, SlotScript>,
    delays: HashMap<Slot, Duration>,
    default_delay: Option<Duration>,
    block_calls: Mutex<HashMap<(Slot, Commitment), usize>>,
    slot_calls: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `get_slot` answers `slot`; without this it fails as unreachable
    pub fn with_latest(self, slot: Slot) -> Self {
        self.set_latest(slot);
        self
    }

    pub fn with_script(mut self, slot: Slot, script: SlotScript) -> Self {
        self.scripts.insert(slot, script);
        self
    }

    /// A block with `count` transactions and full metadata
    pub fn with_block(self, slot: Slot, count: usize) -> Self {
        self.with_script(slot, SlotScript::Block(block(slot, count)))
    }

    /// Consecutive blocks starting at `start`
    pub fn with_counts(mut self, start: Slot, counts: &[usize]) -> Self {
        for (offset, &count) in counts.iter().enumerate() {
            let slot = start + offset as Slot;
            self.scripts.insert(slot, SlotScript::Block(block(slot, count)));
        }
        self
    }

    /// Delay block fetches for `slot`
    pub fn with_delay(mut self, slot: Slot, delay: Duration) -> Self {
        self.delays.insert(slot, delay);
        self
    }

    /// Delay every block fetch without a slot-specific delay
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn set_latest(&self, slot: Slot) {
        *self.latest.lock().unwrap() = Some(slot);
    }

    pub fn block_calls(&self, slot: Slot, commitment: Commitment) -> usize {
        self.block_calls
            .lock()
            .unwrap()
            .get(&(slot, commitment))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_block_calls(&self) -> usize {
        self.block_calls.lock().unwrap().values().sum()
    }

    pub fn slot_calls(&self) -> usize {
        self.slot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_slot(&self, _commitment: Commitment) -> Result<Slot, RpcError> {
        self.slot_calls.fetch_add(1, Ordering::SeqCst);
        let latest = *self.latest.lock().unwrap();
        latest.ok_or_else(|| {
            RpcError::unavailable("getSlot", std::io::Error::other("connection refused"))
        })
    }

    async fn get_block(
        &self,
        slot: Slot,
        request: BlockRequest,
    ) -> Result<Option<Block>, RpcError> {
        *self
            .block_calls
            .lock()
            .unwrap()
            .entry((slot, request.commitment))
            .or_default() += 1;

        if let Some(delay) = self.delays.get(&slot).copied().or(self.default_delay) {
            tokio::time::sleep(delay).await;
        }

        match self.scripts.get(&slot).cloned().unwrap_or(SlotScript::Null) {
            SlotScript::Block(block) => Ok(Some(block)),
            SlotScript::Null => Ok(None),
            SlotScript::Skipped => Err(RpcError::BlockUnavailable {
                slot,
                code: -32007,
                message: format!("Slot {slot} was skipped, or missing due to ledger jump"),
            }),
            SlotScript::Unreachable => Err(RpcError::unavailable(
                format!("getBlock {slot}"),
                std::io::Error::other("connection reset"),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "MockLedger"
    }
}

/// A block at `slot` holding `count` placeholder transactions
pub fn block(slot: Slot, count: usize) -> Block {
    Block {
        transactions: vec![json!({"meta": {"err": null}}); count],
        blockhash: Some(format!("hash-{slot}")),
        parent_slot: slot.checked_sub(1),
        block_time: Some(1_700_000_000 + slot as i64),
    }
}

/// Cache backend whose every operation fails
#[derive(Default)]
pub struct FailingCache {
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

#[async_trait]
impl CacheStore for FailingCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Value>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::unavailable(
            "FailingCache",
            std::io::Error::other("cache down"),
        ))
    }

    async fn set(&self, _key: CacheKey, _value: Value, _ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::unavailable(
            "FailingCache",
            std::io::Error::other("cache down"),
        ))
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "FailingCache"
    }
}

/// Scanner over `ledger` with a fresh memory cache
pub fn scanner(ledger: &Arc<MockLedger>, config: &ScanConfig) -> SlotScanner {
    SlotScanner::with_memory_cache(ledger.clone(), config)
}
