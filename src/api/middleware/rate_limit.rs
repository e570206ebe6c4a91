//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Client IP source for rate limiting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientIpKeyExtractor {
    /// Socket peer address.
    Peer,
    /// `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, then the peer address.
    Forwarded,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        if behind_proxy {
            Self::Forwarded
        } else {
            Self::Peer
        }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        match self {
            Self::Peer => PeerIpKeyExtractor.extract(req),
            Self::Forwarded => SmartIpKeyExtractor.extract(req),
        }
    }
}

/// Rate limiter settings.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Seconds after which one request token is replenished.
    pub per_second: u64,
    pub burst: u32,
    pub behind_proxy: bool,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 5,
            burst: 50,
            behind_proxy: false,
        }
    }
}

/// Creates the per-client rate limiter for the reconciliation endpoints.
///
/// One reconciliation request fans out to many upstream calls, so the
/// burst is generous and the refill slow. Requests exceeding the limit
/// receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/tracking", post(tracking_handler))
///     .layer(rate_limit::layer(RateLimit::default()));
/// ```
pub fn layer(
    limit: RateLimit,
) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor::new(limit.behind_proxy))
            .per_second(limit.per_second.max(1))
            .burst_size(limit.burst.max(1))
            .finish()
            .expect("rate limit values are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
