// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while building an RPC endpoint configuration or client.

/// Errors that can occur when configuring a ledger endpoint
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The RPC URL could not be parsed
    #[error("Invalid URL {0}: {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    /// An environment variable was set but could not be parsed
    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnvValue {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
