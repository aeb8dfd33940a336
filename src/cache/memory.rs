// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with per-entry TTL and optional size limit

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::{types::AccessSequence, CacheKey, CacheStats, CacheStore};
use crate::errors::CacheError;

/// Expiry used when `now + ttl` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Entry in the memory cache with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    /// Instant after which the entry is no longer served
    expires_at: Instant,
    /// Sequence number assigned when the entry was stored
    stored_seq: AccessSequence,
    /// Sequence number of the last access, for LRU eviction
    access_seq: AccessSequence,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Entries plus two ordered indexes over them
///
/// `by_access` orders keys by last access and `by_expiry` by deadline, so
/// eviction and expiry sweeps never scan the whole map.
#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    by_access: BTreeMap<AccessSequence, CacheKey>,
    by_expiry: BTreeMap<(Instant, AccessSequence), CacheKey>,
    stats: CacheStats,
    next_seq: AccessSequence,
}

impl MemoryCacheState {
    fn bump_seq(&mut self) -> AccessSequence {
        let seq = self.next_seq;
        self.next_seq = seq.next();
        seq
    }

    fn insert(&mut self, key: CacheKey, value: Value, expires_at: Instant) {
        self.remove(&key);
        let seq = self.bump_seq();
        self.by_access.insert(seq, key);
        self.by_expiry.insert((expires_at, seq), key);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at,
                stored_seq: seq,
                access_seq: seq,
            },
        );
        self.stats.entries = self.entries.len();
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.by_access.remove(&entry.access_seq);
        self.by_expiry.remove(&(entry.expires_at, entry.stored_seq));
        self.stats.entries = self.entries.len();
        Some(entry)
    }

    /// Marks `key` as most recently used and returns its value
    fn touch(&mut self, key: &CacheKey) -> Option<Value> {
        let seq = self.bump_seq();
        let entry = self.entries.get_mut(key)?;
        let previous = std::mem::replace(&mut entry.access_seq, seq);
        let value = entry.value.clone();
        self.by_access.remove(&previous);
        self.by_access.insert(seq, *key);
        Some(value)
    }

    /// Drops every entry whose deadline has passed
    fn purge_expired(&mut self, now: Instant) -> usize {
        let mut purged = 0;
        while let Some((&(expires_at, _), &key)) = self.by_expiry.first_key_value() {
            if expires_at > now {
                break;
            }
            self.remove(&key);
            purged += 1;
        }
        self.stats.expirations += purged as u64;
        purged
    }

    /// Evicts the least recently used entry
    fn evict_lru(&mut self) {
        let lru_key = self.by_access.first_key_value().map(|(_, key)| *key);

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting LRU cache entry");
            self.remove(&key);
            self.stats.evictions += 1;
        }
    }
}

/// In-memory cache with per-entry TTL and optional size limit
///
/// Every insert first sweeps out entries whose TTL has passed, so a cache
/// that keeps receiving new keys only holds what is still live. When a size
/// limit is set and the cache is still full after the sweep, the least
/// recently used entry is evicted.
///
/// Expiry runs on the Tokio clock, so tests can drive it with paused time.
///
/// # Examples
///
/// ```rust,ignore
/// use slotscan::MemoryCache;
///
/// // Unbounded cache
/// let cache = MemoryCache::new();
///
/// // At most 50k entries, enough for a few wide range scans
/// let cache = MemoryCache::new().with_max_entries(50_000);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    max_entries: Option<usize>,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a new memory cache with no size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries in the cache
    ///
    /// A limit of zero is treated as one.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let expired = match state.entries.get(key) {
            None => {
                state.stats.misses += 1;
                debug!(key = %key, "Cache miss (memory)");
                return Ok(None);
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            debug!(key = %key, "Cache entry expired");
            state.remove(key);
            state.stats.expirations += 1;
            state.stats.misses += 1;
            return Ok(None);
        }

        state.stats.hits += 1;
        debug!(key = %key, "Cache hit (memory)");
        Ok(state.touch(key))
    }

    async fn set(&self, key: CacheKey, value: Value, ttl: Duration) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let purged = state.purge_expired(now);
        if purged > 0 {
            debug!(purged, "Purged expired cache entries");
        }

        if let Some(max_entries) = self.max_entries {
            while !state.entries.contains_key(&key) && state.entries.len() >= max_entries {
                state.evict_lru();
            }
        }

        let expires_at = now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE);
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Inserting entry into memory cache");
        state.insert(key, value, expires_at);

        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing memory cache");
        state.entries.clear();
        state.by_access.clear();
        state.by_expiry.clear();
        state.stats.entries = 0;
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}
