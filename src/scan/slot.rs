// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Latest-slot resolution

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, Instrument};

use crate::cache::{CacheKey, CacheStore, ReadThrough};
use crate::config::constants::LATEST_SLOT_TTL;
use crate::errors::RpcError;
use crate::ledger::LedgerClient;
use crate::tracing::spans;
use crate::types::{Commitment, Slot};

/// Resolves the newest slot at a commitment level, briefly cached
///
/// Unlike the per-slot lookups there is no fallback value here: a ledger
/// failure is returned to the caller.
#[derive(Clone)]
pub struct SlotResolver {
    ledger: Arc<dyn LedgerClient>,
    cache: ReadThrough,
    ttl: Duration,
}

impl SlotResolver {
    pub fn new(ledger: Arc<dyn LedgerClient>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            ledger,
            cache: ReadThrough::new(cache),
            ttl: LATEST_SLOT_TTL,
        }
    }

    /// Override how long a resolved slot is served from cache
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the latest slot, from cache when a value younger than the TTL
    /// exists
    pub async fn get_latest_slot(&self, commitment: Commitment) -> Result<Slot, RpcError> {
        let span = spans::get_latest_slot(commitment);
        async move {
            let key = CacheKey::latest_slot(commitment);
            if let Some(slot) = self.cache.lookup::<Slot>(&key).await {
                debug!(slot, cached = true, "Using cached latest slot");
                return Ok(slot);
            }

            let slot = self.ledger.get_slot(commitment).await?;
            debug!(slot, client = self.ledger.name(), "Resolved latest slot");
            self.cache.store_value(key, &slot, self.ttl).await;
            Ok(slot)
        }
        .instrument(span)
        .await
    }
}
