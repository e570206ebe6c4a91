//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A missing provider credential aborts startup.
//!
//! ## Required Variables
//!
//! ```bash
//! export MERCHIZE_BASE_URL="https://bo-group-2-2.merchize.com/bo-api"
//! export MERCHIZE_ACCESS_TOKEN="..."
//! export DREAMSHIP_ACCESS_TOKEN="..."
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: `false`)
//! - `DREAMSHIP_BASE_URL` - Dreamship API host (default: `https://api.dreamship.com`)
//! - `MERCHIZE_BATCH_SIZE` - Orders per Merchize bulk request (default: 100, 1..=1000)
//! - `DREAMSHIP_CONCURRENCY` - In-flight Dreamship requests per batch (default: 8, 1..=64)
//! - `UPSTREAM_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 10)
//! - `UPSTREAM_TIMEOUT` - Whole-request timeout in seconds (default: 30)
//! - `RATE_LIMIT_PER_SECOND` - Token refill interval per client, in seconds (default: 5)
//! - `RATE_LIMIT_BURST` - Requests a client may burst (default: 50)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::infrastructure::providers::{
    DEFAULT_DREAMSHIP_BASE_URL, DreamshipSettings, MerchizeSettings,
};
use crate::utils::log_sanitizer::mask_token;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    pub merchize_base_url: String,
    pub merchize_access_token: String,
    pub merchize_batch_size: usize,

    pub dreamship_base_url: String,
    pub dreamship_access_token: String,
    pub dreamship_concurrency: usize,

    /// Connect timeout of outbound provider calls, in seconds.
    pub upstream_connect_timeout: u64,
    /// Whole-request timeout of outbound provider calls, in seconds.
    pub upstream_timeout: u64,

    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

/// Reads an optional variable, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a required, non-blank variable.
fn required(key: &str) -> Result<String> {
    let value = env::var(key).with_context(|| format!("{key} must be set"))?;

    if value.trim().is_empty() {
        anyhow::bail!("{key} must not be empty");
    }

    Ok(value.trim().to_string())
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required provider variable is missing.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let merchize_base_url =
            required("MERCHIZE_BASE_URL").context("Failed to load Merchize configuration")?;
        let merchize_access_token =
            required("MERCHIZE_ACCESS_TOKEN").context("Failed to load Merchize configuration")?;

        let dreamship_base_url = env::var("DREAMSHIP_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DREAMSHIP_BASE_URL.to_string());
        let dreamship_access_token =
            required("DREAMSHIP_ACCESS_TOKEN").context("Failed to load Dreamship configuration")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            merchize_base_url,
            merchize_access_token,
            merchize_batch_size: env_or("MERCHIZE_BATCH_SIZE", 100),
            dreamship_base_url,
            dreamship_access_token,
            dreamship_concurrency: env_or("DREAMSHIP_CONCURRENCY", 8),
            upstream_connect_timeout: env_or("UPSTREAM_CONNECT_TIMEOUT", 10),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", 30),
            rate_limit_per_second: env_or("RATE_LIMIT_PER_SECOND", 5),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", 50),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a provider base URL is not an http(s) URL
    /// - a batch size, concurrency, timeout or rate limit is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        validate_base_url("MERCHIZE_BASE_URL", &self.merchize_base_url)?;
        validate_base_url("DREAMSHIP_BASE_URL", &self.dreamship_base_url)?;

        if !(1..=1000).contains(&self.merchize_batch_size) {
            anyhow::bail!(
                "MERCHIZE_BATCH_SIZE must be between 1 and 1000, got {}",
                self.merchize_batch_size
            );
        }

        if !(1..=64).contains(&self.dreamship_concurrency) {
            anyhow::bail!(
                "DREAMSHIP_CONCURRENCY must be between 1 and 64, got {}",
                self.dreamship_concurrency
            );
        }

        if self.upstream_connect_timeout == 0 {
            anyhow::bail!("UPSTREAM_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.upstream_timeout == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT must be greater than 0");
        }

        if self.rate_limit_per_second == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than 0");
        }
        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    pub fn merchize_settings(&self) -> MerchizeSettings {
        MerchizeSettings {
            base_url: self.merchize_base_url.clone(),
            access_token: self.merchize_access_token.clone(),
            batch_size: self.merchize_batch_size,
        }
    }

    pub fn dreamship_settings(&self) -> DreamshipSettings {
        DreamshipSettings {
            base_url: self.dreamship_base_url.clone(),
            access_token: self.dreamship_access_token.clone(),
            concurrency: self.dreamship_concurrency,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_connect_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    /// Prints configuration summary (tokens masked).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Merchize: {} (token {}, batch size {})",
            self.merchize_base_url,
            mask_token(&self.merchize_access_token),
            self.merchize_batch_size
        );
        tracing::info!(
            "  Dreamship: {} (token {}, concurrency {})",
            self.dreamship_base_url,
            mask_token(&self.dreamship_access_token),
            self.dreamship_concurrency
        );
        tracing::info!(
            "  Upstream timeouts: connect {}s, request {}s",
            self.upstream_connect_timeout,
            self.upstream_timeout
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{key} is not a valid URL: '{value}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{key} must start with 'http://' or 'https://', got '{value}'");
    }

    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
