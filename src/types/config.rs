// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for configuration values
//!
//! These types keep scan limits from being confused with slot numbers or
//! transaction counts, and own the clamping rules for caller-supplied limits.

use serde::{Deserialize, Serialize};

/// Number of most-recent slots to report, clamped to `[1, 200]`
///
/// # Examples
///
/// ```
/// use slotscan::RecentLimit;
///
/// assert_eq!(RecentLimit::from(500).get(), 200);
/// assert_eq!(RecentLimit::from(0).get(), 1);
/// assert_eq!(RecentLimit::from(-5).get(), 1);
/// assert_eq!(RecentLimit::from(12.9).get(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentLimit(u64);

impl RecentLimit {
    /// Smallest limit ever honoured
    pub const MIN: Self = Self(1);

    /// Largest limit ever honoured
    pub const MAX: Self = Self(200);

    /// Clamp an integer limit into `[MIN, MAX]`
    pub fn new(limit: i64) -> Self {
        Self(limit.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u64)
    }

    /// Floor a fractional limit, then clamp it. NaN is treated as the minimum.
    pub fn from_f64(limit: f64) -> Self {
        if limit.is_nan() {
            return Self::MIN;
        }
        // `as` saturates at the i64 bounds
        Self::new(limit.floor() as i64)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl Default for RecentLimit {
    fn default() -> Self {
        Self(10)
    }
}

impl From<i64> for RecentLimit {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for RecentLimit {
    fn from(value: i32) -> Self {
        Self::new(value.into())
    }
}

impl From<f64> for RecentLimit {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl std::fmt::Display for RecentLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slots", self.0)
    }
}

/// Widest inclusive slot range a single range query may cover
///
/// Every slot in a range costs one ledger fetch on a cache miss, so the width
/// bounds the work one caller can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxRangeWidth(u64);

impl MaxRangeWidth {
    pub const DEFAULT: Self = Self(10_000);

    /// Create a width limit; zero is raised to one slot
    pub const fn new(slots: u64) -> Self {
        if slots == 0 {
            Self(1)
        } else {
            Self(slots)
        }
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether an inclusive range of `width` slots fits under this limit
    pub fn allows(&self, width: u64) -> bool {
        width <= self.0
    }
}

impl Default for MaxRangeWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for MaxRangeWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slots", self.0)
    }
}

/// Number of per-slot fetches allowed in flight during a range or recent scan
///
/// One means strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concurrency(usize);

impl Concurrency {
    pub const SEQUENTIAL: Self = Self(1);

    /// Create a concurrency bound; zero is raised to one
    pub const fn new(limit: usize) -> Self {
        if limit == 0 {
            Self(1)
        } else {
            Self(limit)
        }
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::SEQUENTIAL
    }
}
