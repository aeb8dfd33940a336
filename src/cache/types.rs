// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for cache metadata

use serde::{Deserialize, Serialize};

/// Monotonic sequence number for deterministic LRU ordering
///
/// Paused or coarse clocks hand out identical instants to back-to-back
/// accesses, so eviction orders by this counter instead of by time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccessSequence(pub u64);

impl AccessSequence {
    /// Returns the following sequence number, saturating at `u64::MAX`
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}
