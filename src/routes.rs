//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Configuration check of both provider clients
//! - `/api/*`            - Reconciliation endpoints (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-client limits of the `/api` routes; with
///   `behind_proxy` the client IP is read from `X-Forwarded-For` /
///   `X-Real-IP` instead of the peer socket address, so enable it only
///   behind a trusted reverse proxy
pub fn app_router(state: AppState, rate_limit: RateLimit) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes().layer(rate_limit::layer(rate_limit));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
