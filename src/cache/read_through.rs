// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed, fail-open access to a [`CacheStore`]

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{CacheKey, CacheStore};
use crate::errors::CacheError;

/// Typed wrapper used by the scan components
///
/// A cache that errors or holds an undecodable value behaves as a miss; a
/// failed write is logged and dropped. The cache never turns a successful
/// ledger read into a failed call.
#[derive(Clone)]
pub(crate) struct ReadThrough {
    store: Arc<dyn CacheStore>,
}

impl ReadThrough {
    pub(crate) fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Returns the cached value for `key`, if one is live and decodes as `T`
    pub(crate) async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let value = match self.store.get(key).await {
            Ok(value) => value?,
            Err(e) => {
                warn!(
                    cache = self.store.name(),
                    key = %key,
                    error = %e,
                    "Cache read failed, treating as miss"
                );
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(source) => {
                let e = CacheError::serialization(key.to_string(), source);
                warn!(cache = self.store.name(), error = %e, "Ignoring undecodable cache entry");
                None
            }
        }
    }

    /// Stores `value` under `key` for `ttl`, logging and dropping failures
    pub(crate) async fn store_value<T: Serialize>(&self, key: CacheKey, value: &T, ttl: Duration) {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(source) => {
                let e = CacheError::serialization(key.to_string(), source);
                warn!(cache = self.store.name(), error = %e, "Failed to encode cache entry");
                return;
            }
        };

        if let Err(e) = self.store.set(key, encoded, ttl).await {
            warn!(
                cache = self.store.name(),
                key = %key,
                error = %e,
                "Cache write failed, continuing without caching"
            );
        }
    }
}
