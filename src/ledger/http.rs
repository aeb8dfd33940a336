// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON-RPC ledger client over HTTP

use std::future::IntoFuture;
use std::time::Duration;

use alloy_json_rpc::{RpcRecv, RpcSend};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_transport::TransportError;
use alloy_transport_http::Http;
use async_trait::async_trait;
use serde::Serialize;

use super::{Block, BlockRequest, LedgerClient, RpcEndpointConfig};
use crate::errors::{is_block_unavailable_code, EndpointError, RpcError};
use crate::transport::{RpcTraceLayer, ThrottleLayer};
use crate::types::{Commitment, Slot};

#[derive(Debug, Clone, Serialize)]
struct SlotParams {
    commitment: Commitment,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockParams {
    encoding: &'static str,
    rewards: bool,
    #[serde(flatten)]
    request: BlockRequest,
}

impl From<BlockRequest> for BlockParams {
    fn from(request: BlockRequest) -> Self {
        Self {
            encoding: "json",
            rewards: false,
            request,
        }
    }
}

/// Ledger client speaking JSON-RPC to a remote node
///
/// Every request passes through [`RpcTraceLayer`], and through
/// [`ThrottleLayer`] when the endpoint config sets a rate limit. Each call is
/// bounded by the endpoint timeout.
///
/// # Example
///
/// ```rust,no_run
/// use slotscan::{HttpLedgerClient, LedgerClient, RpcEndpointConfig, Commitment};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpLedgerClient::new(&RpcEndpointConfig::mainnet_beta())?;
/// let slot = client.get_slot(Commitment::Finalized).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    client: RpcClient,
    timeout: Duration,
}

impl HttpLedgerClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &RpcEndpointConfig) -> Result<Self, EndpointError> {
        let url = config
            .url
            .parse()
            .map_err(|e| EndpointError::InvalidUrl(config.url.clone(), e))?;
        let http = Http::new(url);

        let client = match config.rate_limit_per_second {
            Some(rps) => ClientBuilder::default()
                .layer(ThrottleLayer::per_second(rps))
                .layer(RpcTraceLayer::new())
                .transport(http, false),
            None => ClientBuilder::default()
                .layer(RpcTraceLayer::new())
                .transport(http, false),
        };

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Create a client from `SOLANA_RPC_*` environment variables
    pub fn from_env() -> Result<Self, EndpointError> {
        Self::new(&RpcEndpointConfig::from_env()?)
    }

    async fn call<P, R>(
        &self,
        method: &'static str,
        params: P,
        slot: Option<Slot>,
    ) -> Result<R, RpcError>
    where
        P: RpcSend,
        R: RpcRecv,
    {
        let request = self.client.request(method, params).into_future();
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(classify_error(method, slot, e)),
            Err(_) => Err(RpcError::timeout(operation(method, slot), self.timeout)),
        }
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn get_slot(&self, commitment: Commitment) -> Result<Slot, RpcError> {
        self.call("getSlot", (SlotParams { commitment },), None)
            .await
    }

    async fn get_block(
        &self,
        slot: Slot,
        request: BlockRequest,
    ) -> Result<Option<Block>, RpcError> {
        self.call("getBlock", (slot, BlockParams::from(request)), Some(slot))
            .await
    }

    fn name(&self) -> &'static str {
        "HttpLedgerClient"
    }
}

fn operation(method: &str, slot: Option<Slot>) -> String {
    match slot {
        Some(slot) => format!("{method} {slot}"),
        None => method.to_string(),
    }
}

/// Map a transport error onto the ledger error taxonomy
fn classify_error(method: &str, slot: Option<Slot>, error: TransportError) -> RpcError {
    if let (Some(slot), Some(payload)) = (slot, error.as_error_resp()) {
        if is_block_unavailable_code(payload.code) {
            return RpcError::BlockUnavailable {
                slot,
                code: payload.code,
                message: payload.message.to_string(),
            };
        }
    }

    if matches!(error, alloy_json_rpc::RpcError::DeserError { .. }) {
        return RpcError::invalid_response(operation(method, slot), error);
    }

    RpcError::unavailable(operation(method, slot), error)
}
