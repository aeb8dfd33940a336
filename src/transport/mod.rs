// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for the ledger JSON-RPC client.
//!
//! Tower middleware composed onto the alloy RPC client by
//! [`HttpLedgerClient`](crate::HttpLedgerClient):
//!
//! - [`RpcTraceLayer`]: per-call tracing with ledger error classification
//! - [`ThrottleLayer`]: minimum spacing between requests for rate-limited
//!   public endpoints
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slotscan::transport::{RpcTraceLayer, ThrottleLayer};
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(ThrottleLayer::per_second(10))
//!     .layer(RpcTraceLayer::new())
//!     .http(rpc_url);
//! ```

mod throttle;
mod trace;

pub use throttle::{ThrottleLayer, ThrottleService};
pub use trace::{RpcTraceLayer, RpcTraceService};
