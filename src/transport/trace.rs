// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layer that traces ledger RPC calls.
//!
//! Records the method and wall-clock duration of every call. Error payloads
//! are classified: "no block for this slot" codes are routine during range
//! scans and are logged at debug, anything else at warn.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket, ResponsePayload};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

use crate::errors::is_block_unavailable_code;

/// A Tower layer that adds tracing to ledger RPC requests.
///
/// # Example
///
/// ```rust,ignore
/// use slotscan::transport::RpcTraceLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(RpcTraceLayer::new().with_payloads())
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RpcTraceLayer {
    /// Log full request and response packets at trace level
    log_payloads: bool,
}

impl RpcTraceLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log full request and response packets (verbose for full blocks)
    pub fn with_payloads(mut self) -> Self {
        self.log_payloads = true;
        self
    }
}

impl<S> Layer<S> for RpcTraceLayer {
    type Service = RpcTraceService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RpcTraceService {
            service,
            log_payloads: self.log_payloads,
        }
    }
}

/// Service produced by [`RpcTraceLayer`]
#[derive(Clone, Debug)]
pub struct RpcTraceService<S> {
    service: S,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for RpcTraceService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();
        let method = method_name(&request);
        let span = tracing::debug_span!("slotscan.rpc", method = %method);

        Box::pin(
            async move {
                if log_payloads {
                    trace!(request = ?request, "RPC request");
                }

                let start = Instant::now();
                let result = service.call(request).await;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) => {
                        if log_payloads {
                            trace!(response = ?response, elapsed_ms, "RPC response");
                        }
                        for (code, message) in error_payloads(response) {
                            if is_block_unavailable_code(code) {
                                debug!(
                                    code,
                                    reason = message,
                                    elapsed_ms,
                                    "RPC reported no block: {method}"
                                );
                            } else {
                                warn!(
                                    code,
                                    reason = message,
                                    elapsed_ms,
                                    "RPC error response: {method}"
                                );
                            }
                        }
                        debug!(elapsed_ms, "RPC completed: {method}");
                    }
                    Err(e) => {
                        warn!(error = %e, elapsed_ms, "RPC transport error: {method}");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

fn method_name(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}

/// Error codes and messages carried by a response packet
fn error_payloads(response: &ResponsePacket) -> Vec<(i64, &str)> {
    let responses = match response {
        ResponsePacket::Single(single) => std::slice::from_ref(single),
        ResponsePacket::Batch(batch) => batch.as_slice(),
    };
    responses
        .iter()
        .filter_map(|r| match &r.payload {
            ResponsePayload::Failure(err) => Some((err.code, err.message.as_ref())),
            ResponsePayload::Success(_) => None,
        })
        .collect()
}
