// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for slot scan operations
//!
//! Controls cache lifetimes, how many per-slot fetches an aggregate may keep
//! in flight, and how wide a range query may be.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use slotscan::ScanConfig;
//! use std::time::Duration;
//!
//! let config = ScanConfig::default();
//! assert_eq!(config.latest_slot_ttl, Duration::from_secs(2));
//! assert_eq!(config.slot_ttl, Duration::from_secs(10));
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use slotscan::ScanConfigBuilder;
//!
//! let config = ScanConfigBuilder::new()
//!     .concurrency(8)
//!     .max_range_width(2_000)
//!     .build();
//! assert_eq!(config.concurrency.get(), 8);
//! ```

use std::time::Duration;

use crate::types::config::{Concurrency, MaxRangeWidth};

pub mod constants;

use constants::{LATEST_SLOT_TTL, SLOT_TTL};

/// Configuration for slot scan operations
///
/// Use [`ScanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Lifetime of cached latest-slot entries
    /// Default: 2 seconds (the ledger head moves quickly)
    pub latest_slot_ttl: Duration,

    /// Lifetime of cached per-slot count and summary entries
    /// Default: 10 seconds
    pub slot_ttl: Duration,

    /// Per-slot fetches kept in flight by range and recent scans
    /// Default: 1 (sequential)
    pub concurrency: Concurrency,

    /// Widest inclusive range a range query may cover
    /// Default: 10 000 slots. `None` disables the check.
    pub max_range_width: Option<MaxRangeWidth>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            latest_slot_ttl: LATEST_SLOT_TTL,
            slot_ttl: SLOT_TTL,
            concurrency: Concurrency::SEQUENTIAL,
            max_range_width: Some(MaxRangeWidth::DEFAULT),
        }
    }
}

impl ScanConfig {
    /// Default TTLs, sequential scans, and no range width limit
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotscan::ScanConfig;
    ///
    /// let config = ScanConfig::minimal();
    /// assert!(config.max_range_width.is_none());
    /// ```
    pub fn minimal() -> Self {
        Self {
            max_range_width: None,
            ..Self::default()
        }
    }
}

/// Builder for [`ScanConfig`]
///
/// # Example
///
/// ```rust
/// use slotscan::ScanConfigBuilder;
/// use std::time::Duration;
///
/// let config = ScanConfigBuilder::new()
///     .slot_ttl(Duration::from_secs(30))
///     .unbounded_range()
///     .build();
/// assert!(config.max_range_width.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    /// Create a new builder starting from [`ScanConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lifetime of cached latest-slot entries
    pub fn latest_slot_ttl(mut self, ttl: Duration) -> Self {
        self.config.latest_slot_ttl = ttl;
        self
    }

    /// Set the lifetime of cached per-slot entries
    pub fn slot_ttl(mut self, ttl: Duration) -> Self {
        self.config.slot_ttl = ttl;
        self
    }

    /// Set how many per-slot fetches range and recent scans keep in flight
    ///
    /// Zero is treated as one.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.config.concurrency = Concurrency::new(limit);
        self
    }

    /// Cap the inclusive width of range queries
    pub fn max_range_width(mut self, slots: u64) -> Self {
        self.config.max_range_width = Some(MaxRangeWidth::new(slots));
        self
    }

    /// Remove the range width cap
    pub fn unbounded_range(mut self) -> Self {
        self.config.max_range_width = None;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ScanConfig {
        self.config
    }
}
