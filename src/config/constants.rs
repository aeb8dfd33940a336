// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known endpoints and default lifetimes

use std::time::Duration;

/// Default lifetime of a cached latest-slot entry
pub const LATEST_SLOT_TTL: Duration = Duration::from_secs(2);

/// Default lifetime of a cached per-slot count or summary entry
pub const SLOT_TTL: Duration = Duration::from_secs(10);

/// Public ledger RPC endpoints
pub mod endpoints {
    /// Public mainnet-beta endpoint (rate limited per IP)
    pub const MAINNET_BETA: &str = "https://api.mainnet-beta.solana.com";

    /// Public devnet endpoint
    pub const DEVNET: &str = "https://api.devnet.solana.com";

    /// Default address of a local test validator
    pub const LOCAL_VALIDATOR: &str = "http://127.0.0.1:8899";
}

/// Environment variables read by [`RpcEndpointConfig::from_env`](crate::RpcEndpointConfig::from_env)
pub mod env {
    pub const RPC_URL: &str = "SOLANA_RPC_URL";
    pub const RPC_RATE_LIMIT: &str = "SOLANA_RPC_RATE_LIMIT";
    pub const RPC_TIMEOUT_SECS: &str = "SOLANA_RPC_TIMEOUT_SECS";
}
