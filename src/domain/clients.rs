//! Provider client contract and its error taxonomy.

use async_trait::async_trait;

use crate::domain::entities::{
    HistoryLookup, LookupPurpose, Provider, ProviderOrderInput, ProviderRecord,
};
use crate::domain::matcher::MatchStep;

/// Errors raised by a provider client.
///
/// All variants except `Configuration` are batch-level: the caller reports
/// the message on every row of the failed call. `Configuration` is raised
/// when a client is constructed, i.e. at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Non-2xx response; status and body are surfaced verbatim.
    #[error("{provider} API error: {status} {body}")]
    Unavailable {
        provider: Provider,
        status: u16,
        body: String,
    },

    /// Transport failure (connect, TLS, timeout, truncated body).
    #[error("{provider} API unreachable: {detail}")]
    Network { provider: Provider, detail: String },

    /// 2xx response whose body reports `success: false`.
    #[error("{message}")]
    Rejected { provider: Provider, message: String },

    /// Response body could not be decoded.
    #[error("{provider} API returned an unreadable response: {detail}")]
    Parse { provider: Provider, detail: String },

    /// The order or fulfillment a history lookup refers to does not exist.
    #[error("{provider} order not found for shipment history: {reference}")]
    HistoryNotFound { provider: Provider, reference: String },

    /// Missing or invalid base URL / credential.
    #[error("{provider} client is misconfigured: {detail}")]
    Configuration { provider: Provider, detail: String },
}

impl ProviderError {
    /// The provider that produced the error.
    pub fn provider(&self) -> Provider {
        match self {
            Self::Unavailable { provider, .. }
            | Self::Network { provider, .. }
            | Self::Rejected { provider, .. }
            | Self::Parse { provider, .. }
            | Self::HistoryNotFound { provider, .. }
            | Self::Configuration { provider, .. } => *provider,
        }
    }
}

/// Stateless HTTP wrapper around one fulfillment provider.
///
/// # Implementations
///
/// - [`crate::infrastructure::providers::MerchizeClient`] - external-number based bulk API
/// - [`crate::infrastructure::providers::DreamshipClient`] - reference-id based per-order API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// The provider this client talks to.
    fn provider(&self) -> Provider;

    /// Matching cascade used to map bulk results back to inputs.
    fn match_steps(&self, purpose: LookupPurpose) -> &'static [MatchStep];

    /// Resolves many identifiers to provider records.
    ///
    /// The returned records are unordered and may be incomplete; use
    /// [`crate::domain::matcher::match_batch`] to assign them to inputs.
    ///
    /// # Errors
    ///
    /// Any failed upstream call fails the whole batch.
    async fn bulk_lookup_by_code(
        &self,
        inputs: &[ProviderOrderInput],
        purpose: LookupPurpose,
    ) -> Result<Vec<ProviderRecord>, ProviderError>;

    /// Resolves a single identifier to its canonical record.
    ///
    /// Returns `Ok(None)` when the provider knows no such order.
    async fn lookup_by_reference(
        &self,
        input: &ProviderOrderInput,
    ) -> Result<Option<ProviderRecord>, ProviderError>;

    /// Fetches the most recent shipment-status event of one fulfillment.
    ///
    /// Returns [`HistoryLookup::NoHistory`] when the fulfillment has no events.
    async fn fetch_latest_history_event(
        &self,
        order_code: &str,
        fulfillment_id: &str,
    ) -> Result<HistoryLookup, ProviderError>;
}
