// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ledger endpoint configuration options

use std::time::Duration;

use dotenvy::var;

use crate::config::constants::{endpoints, env};
use crate::errors::EndpointError;

/// Configuration for connecting to a ledger RPC endpoint
///
/// # Example
///
/// ```rust
/// use slotscan::RpcEndpointConfig;
/// use std::time::Duration;
///
/// let config = RpcEndpointConfig::new("https://my-node.example")
///     .with_rate_limit(50)
///     .with_timeout(Duration::from_secs(10));
/// assert!(config.has_rate_limiting());
/// ```
#[derive(Debug, Clone)]
pub struct RpcEndpointConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Rate limit in requests per second (None for unlimited)
    pub rate_limit_per_second: Option<u32>,
    /// Upper bound on a single RPC call
    pub timeout: Duration,
}

impl RpcEndpointConfig {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new endpoint configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            rate_limit_per_second: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set rate limiting (requests per second)
    ///
    /// Public endpoints throttle per IP; range scans easily exceed that without
    /// client-side spacing.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set rate limiting from an optional value
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if this configuration includes rate limiting
    #[must_use]
    pub fn has_rate_limiting(&self) -> bool {
        self.rate_limit_per_second.is_some()
    }

    /// Public mainnet-beta endpoint with conservative throttling
    #[must_use]
    pub fn mainnet_beta() -> Self {
        Self::new(endpoints::MAINNET_BETA).with_rate_limit(10)
    }

    /// Public devnet endpoint with conservative throttling
    #[must_use]
    pub fn devnet() -> Self {
        Self::new(endpoints::DEVNET).with_rate_limit(10)
    }

    /// Local test validator, unthrottled
    #[must_use]
    pub fn local_validator() -> Self {
        Self::new(endpoints::LOCAL_VALIDATOR).with_timeout(Duration::from_secs(120))
    }

    /// Configuration for `url`, using the matching preset for the public
    /// endpoints so they keep their throttling
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        match url.trim_end_matches('/') {
            endpoints::MAINNET_BETA => Self::mainnet_beta(),
            endpoints::DEVNET => Self::devnet(),
            _ => Self::new(url),
        }
    }

    /// Build a configuration from the environment
    ///
    /// Reads `SOLANA_RPC_URL` (defaulting to public mainnet-beta, which also
    /// enables its throttling), `SOLANA_RPC_RATE_LIMIT` and
    /// `SOLANA_RPC_TIMEOUT_SECS`. A `.env` file is honoured when present.
    pub fn from_env() -> Result<Self, EndpointError> {
        Self::from_env_with_url(None)
    }

    /// Like [`from_env`](Self::from_env), with `url` taking precedence over
    /// `SOLANA_RPC_URL`
    ///
    /// The rate limit and timeout variables still apply.
    pub fn from_env_with_url(url: Option<String>) -> Result<Self, EndpointError> {
        dotenvy::dotenv().ok();

        let mut config = match url.or_else(|| var(env::RPC_URL).ok()) {
            Some(url) => Self::for_url(url),
            None => Self::mainnet_beta(),
        };

        if let Ok(value) = var(env::RPC_RATE_LIMIT) {
            let limit = value
                .parse::<u32>()
                .map_err(|source| EndpointError::InvalidEnvValue {
                    var: env::RPC_RATE_LIMIT,
                    value: value.clone(),
                    source,
                })?;
            // Zero disables throttling
            config = config.with_rate_limit_opt((limit > 0).then_some(limit));
        }

        if let Ok(value) = var(env::RPC_TIMEOUT_SECS) {
            let secs = value
                .parse::<u64>()
                .map_err(|source| EndpointError::InvalidEnvValue {
                    var: env::RPC_TIMEOUT_SECS,
                    value: value.clone(),
                    source,
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl Default for RpcEndpointConfig {
    fn default() -> Self {
        Self::mainnet_beta()
    }
}
