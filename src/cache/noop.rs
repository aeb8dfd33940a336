// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! No-operation cache that disables caching entirely

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::{CacheKey, CacheStats, CacheStore};
use crate::errors::CacheError;

/// A no-operation cache that disables caching entirely
///
/// Reads always miss and writes are dropped, so every scan call goes to the
/// ledger.
///
/// # Examples
///
/// ```rust,ignore
/// use slotscan::{NoOpCache, SlotScanner, ScanConfig};
/// use std::sync::Arc;
///
/// let scanner = SlotScanner::new(ledger, Arc::new(NoOpCache), &ScanConfig::default());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl CacheStore for NoOpCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Value>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: CacheKey, _value: Value, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
