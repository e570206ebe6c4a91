//! Shared HTTP plumbing for provider clients.
//!
//! Every client builds its own `RequestBuilder`; this module sends it, logs
//! the exchange and turns transport / status / decoding failures into
//! [`ProviderError`]s. No retries are performed.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::domain::clients::ProviderError;
use crate::domain::entities::Provider;
use crate::utils::log_sanitizer::truncate_for_log;

/// Builds the shared outbound client with transport-level timeouts.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Validates a base URL and bearer token at client construction.
pub(crate) fn parse_endpoint(
    provider: Provider,
    base_url: &str,
    access_token: &str,
) -> Result<Url, ProviderError> {
    let configuration = |detail: String| ProviderError::Configuration { provider, detail };

    if access_token.trim().is_empty() {
        return Err(configuration("access token is empty".to_string()));
    }

    let url = Url::parse(base_url.trim())
        .map_err(|e| configuration(format!("invalid base URL '{base_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(configuration(format!(
            "base URL must be an http(s) URL, got '{base_url}'"
        )));
    }

    Ok(url)
}

/// Appends path segments to a base URL.
///
/// An empty last segment produces a trailing slash.
pub(crate) fn join_segments(
    provider: Provider,
    base: &Url,
    segments: &[&str],
) -> Result<Url, ProviderError> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|()| ProviderError::Configuration {
            provider,
            detail: format!("base URL '{base}' cannot carry a path"),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Sends a request and returns the status and the response text.
///
/// Non-2xx statuses are returned as-is so callers can treat e.g. 404 as
/// "not found"; use [`ensure_success`] for the default mapping.
pub(crate) async fn execute(
    request: RequestBuilder,
    provider: Provider,
    action: &str,
) -> Result<(StatusCode, String), ProviderError> {
    tracing::debug!(%provider, action, "Sending upstream request");

    let response = request.send().await.map_err(|e| ProviderError::Network {
        provider,
        detail: e.to_string(),
    })?;

    let status = response.status();

    let body = response.text().await.map_err(|e| ProviderError::Network {
        provider,
        detail: format!("failed to read response body: {e}"),
    })?;

    tracing::debug!(
        %provider,
        action,
        status = status.as_u16(),
        body = %truncate_for_log(&body),
        "Upstream response"
    );

    Ok((status, body))
}

/// Maps a non-2xx status to [`ProviderError::Unavailable`].
pub(crate) fn ensure_success(
    provider: Provider,
    status: StatusCode,
    body: String,
) -> Result<String, ProviderError> {
    if status.is_success() {
        return Ok(body);
    }

    tracing::warn!(%provider, status = status.as_u16(), "Upstream returned an error status");

    Err(ProviderError::Unavailable {
        provider,
        status: status.as_u16(),
        body,
    })
}

/// Decodes a JSON body.
pub(crate) fn parse_json<T: DeserializeOwned>(
    provider: Provider,
    body: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            %provider,
            error = %e,
            raw = %truncate_for_log(body),
            "Failed to decode upstream response"
        );
        ProviderError::Parse {
            provider,
            detail: e.to_string(),
        }
    })
}
