// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layer that spaces out RPC requests.
//!
//! Each request reserves the next free send time under a lock and then sleeps
//! until it arrives, so requests leave at most once per `spacing` in the
//! order they were issued. No bursting.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::sync::Mutex;
use tokio::time::Instant;
use tower::Layer;
use tracing::trace;

/// A Tower layer that enforces a minimum gap between requests.
///
/// All services produced by one layer share the same schedule.
///
/// # Example
///
/// ```rust
/// use slotscan::transport::ThrottleLayer;
/// use std::time::Duration;
///
/// // Public endpoints allow roughly 10 requests per second per IP
/// let layer = ThrottleLayer::per_second(10);
/// assert_eq!(layer.spacing(), Duration::from_millis(100));
/// ```
#[derive(Clone, Debug)]
pub struct ThrottleLayer {
    spacing: Duration,
    next_free: Arc<Mutex<Option<Instant>>>,
}

impl ThrottleLayer {
    /// Requests leave at least `spacing` apart
    pub fn with_spacing(spacing: Duration) -> Self {
        Self {
            spacing,
            next_free: Arc::new(Mutex::new(None)),
        }
    }

    /// At most `requests` requests per second; zero is treated as one
    pub fn per_second(requests: u32) -> Self {
        Self::with_spacing(Duration::from_secs(1) / requests.max(1))
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = ThrottleService<S>;

    fn layer(&self, service: S) -> Self::Service {
        ThrottleService {
            service,
            spacing: self.spacing,
            next_free: self.next_free.clone(),
        }
    }
}

/// Service produced by [`ThrottleLayer`]
#[derive(Clone, Debug)]
pub struct ThrottleService<S> {
    service: S,
    spacing: Duration,
    next_free: Arc<Mutex<Option<Instant>>>,
}

/// Claim the next send time and push the schedule forward
async fn reserve(next_free: &Mutex<Option<Instant>>, spacing: Duration) -> Instant {
    let mut next = next_free.lock().await;
    let now = Instant::now();
    let at = next.map_or(now, |free| free.max(now));
    *next = Some(at + spacing);
    at
}

impl<S, Request> tower::Service<Request> for ThrottleService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let next_free = self.next_free.clone();
        let spacing = self.spacing;
        let mut service = self.service.clone();

        Box::pin(async move {
            let at = reserve(&next_free, spacing).await;
            let wait = at.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                trace!(wait_ms = wait.as_millis() as u64, "Throttling RPC request");
                tokio::time::sleep_until(at).await;
            }
            service.call(request).await
        })
    }
}
