//! HTTP server initialization and runtime setup.
//!
//! Builds the shared upstream HTTP client and both provider clients, then
//! runs the Axum server until Ctrl-C.

use crate::api::middleware::rate_limit::RateLimit;
use crate::application::services::ProviderSet;
use crate::config::Config;
use crate::infrastructure::providers::{DreamshipClient, MerchizeClient, build_http_client};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the provider clients from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a provider's base
/// URL or token is unusable.
pub fn build_providers(config: &Config) -> Result<ProviderSet> {
    let http = build_http_client(config.connect_timeout(), config.request_timeout())
        .context("Failed to build upstream HTTP client")?;

    let merchize = MerchizeClient::new(http.clone(), &config.merchize_settings())?;
    tracing::info!("Merchize client ready");

    let dreamship = DreamshipClient::new(http, &config.dreamship_settings())?;
    tracing::info!("Dreamship client ready");

    Ok(ProviderSet::new(Arc::new(merchize), Arc::new(dreamship)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - A provider client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = AppState::new(build_providers(&config)?);

    let app = app_router(
        state,
        RateLimit {
            per_second: config.rate_limit_per_second,
            burst: config.rate_limit_burst,
            behind_proxy: config.behind_proxy,
        },
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
