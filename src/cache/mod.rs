// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backends for slot scan results
//!
//! Every scan component reads through a [`CacheStore`] injected at
//! construction. Two backends ship with the crate:
//!
//! - [`MemoryCache`]: in-process map with per-entry TTL and optional size limit
//! - [`NoOpCache`]: disables caching entirely
//!
//! Distributed backends implement [`CacheStore`] themselves; keys render to
//! stable strings through [`CacheKey`]'s `Display` impl.
//!
//! # Examples
//!
//! ```rust,ignore
//! use slotscan::{MemoryCache, NoOpCache, SlotScanner, ScanConfig};
//! use std::sync::Arc;
//!
//! // Bounded in-memory cache
//! let cache = Arc::new(MemoryCache::new().with_max_entries(10_000));
//! let scanner = SlotScanner::new(ledger.clone(), cache, &ScanConfig::default());
//!
//! // No cache (always fetch)
//! let scanner = SlotScanner::new(ledger, Arc::new(NoOpCache), &ScanConfig::default());
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::errors::CacheError;
use crate::types::{Commitment, Slot};

mod memory;
mod noop;
mod read_through;
pub(crate) mod types;

pub use memory::MemoryCache;
pub use noop::NoOpCache;
pub(crate) use read_through::ReadThrough;

/// Key for a cached scan result
///
/// One variant per cached operation, so two calls with the same operation and
/// parameters always address the same entry and no two operations collide.
/// The rendered form is `latestSlot:{commitment}`, `txCount:{slot}:{commitment}`
/// or `blockSummary:{slot}:{commitment}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheKey {
    LatestSlot {
        commitment: Commitment,
    },
    TxCount {
        slot: Slot,
        commitment: Commitment,
    },
    BlockSummary {
        slot: Slot,
        commitment: Commitment,
    },
}

impl CacheKey {
    pub fn latest_slot(commitment: Commitment) -> Self {
        CacheKey::LatestSlot { commitment }
    }

    pub fn tx_count(slot: Slot, commitment: Commitment) -> Self {
        CacheKey::TxCount { slot, commitment }
    }

    pub fn block_summary(slot: Slot, commitment: Commitment) -> Self {
        CacheKey::BlockSummary { slot, commitment }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::LatestSlot { commitment } => write!(f, "latestSlot:{commitment}"),
            CacheKey::TxCount { slot, commitment } => write!(f, "txCount:{slot}:{commitment}"),
            CacheKey::BlockSummary { slot, commitment } => {
                write!(f, "blockSummary:{slot}:{commitment}")
            }
        }
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of entries expired due to TTL
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Key-value store backing the scan components
///
/// Values are JSON documents; each entry carries its own TTL because
/// latest-slot and per-slot entries age at different rates.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and support concurrent access. Keys are
/// never read-modify-written, so no cross-key coordination is needed.
///
/// # Error Handling
///
/// Backends report failures as [`CacheError`]. Callers in this crate treat a
/// failed `get` as a miss and a failed `set` as a dropped write.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl`
    async fn set(&self, key: CacheKey, value: Value, ttl: Duration) -> Result<(), CacheError>;

    /// Removes every entry
    async fn clear(&self) -> Result<(), CacheError>;

    /// Returns current cache statistics
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend, used in logs
    fn name(&self) -> &'static str;
}
