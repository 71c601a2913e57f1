//! Optional request throttle and access log.

use crate::error::CollectorError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Instant};
use tracing::{debug, info, warn};

type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Process-wide request budget.
///
/// Off unless a positive per-minute rate is configured; when off every
/// request is admitted and the router does not install the layer.
#[derive(Clone, Default)]
pub struct Throttle {
    limiter: Option<Arc<GlobalLimiter>>,
}

impl Throttle {
    /// Budget of `requests` per minute; `0` disables throttling.
    pub fn per_minute(requests: u32) -> Self {
        let limiter = NonZeroU32::new(requests)
            .map(|n| Arc::new(RateLimiter::direct(Quota::per_minute(n))));
        Self { limiter }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    fn admit(&self) -> bool {
        self.limiter
            .as_ref()
            .map_or(true, |limiter| limiter.check().is_ok())
    }
}

/// Reject with 429 once the configured budget is spent.
pub async fn throttle(
    State(throttle): State<Throttle>,
    request: Request,
    next: Next,
) -> Result<Response, CollectorError> {
    if !throttle.admit() {
        warn!(path = %request.uri().path(), "Request throttled");
        return Err(CollectorError::Throttled);
    }

    Ok(next.run(request).await)
}

/// One line per request: path, status and elapsed milliseconds.
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        500.. => warn!(%method, %path, status, elapsed_ms, "Request failed"),
        201 => info!(%method, %path, status, elapsed_ms, "Request handled"),
        _ => debug!(%method, %path, status, elapsed_ms, "Request handled"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_disables_throttle() {
        let throttle = Throttle::per_minute(0);

        assert!(!throttle.is_enabled());
        assert!((0..1_000).all(|_| throttle.admit()));
    }

    #[test]
    fn test_budget_is_enforced_when_configured() {
        let throttle = Throttle::per_minute(2);

        assert!(throttle.is_enabled());
        assert!(throttle.admit());
        assert!(throttle.admit());
        assert!(!throttle.admit());
    }

    #[test]
    fn test_clones_share_one_budget() {
        let throttle = Throttle::per_minute(1);
        let other = throttle.clone();

        assert!(throttle.admit());
        assert!(!other.admit());
    }
}
