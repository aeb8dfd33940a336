// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for cache backends.

/// Errors a [`CacheStore`](crate::CacheStore) backend may report.
///
/// The scan components never fail a request because of these: a failed read is
/// treated as a miss and a failed write is logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backend could not be reached or refused the operation.
    #[error("Cache backend {backend} unavailable")]
    Unavailable {
        /// Name of the backend (e.g. "MemoryCache")
        backend: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A cached value could not be encoded or decoded.
    #[error("Cache serialization error for key {key}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Create an `Unavailable` error from any error type.
    pub fn unavailable(
        backend: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CacheError::Unavailable {
            backend: backend.into(),
            source: Box::new(source),
        }
    }

    /// Create a `Serialization` error for a key.
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        CacheError::Serialization {
            key: key.into(),
            source,
        }
    }
}
