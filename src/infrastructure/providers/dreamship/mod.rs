//! Dreamship provider client.
//!
//! Dreamship has no bulk endpoint. A bulk lookup is a concurrency-capped
//! fan-out of single-order requests, results in input order.

mod types;

pub use types::{DreamshipFulfillment, DreamshipOrder, DreamshipTracking};

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use reqwest::{Client, StatusCode};
use url::Url;

use self::types::DreamshipOrderPage;
use super::http::{ensure_success, execute, join_segments, parse_endpoint, parse_json};
use crate::domain::clients::{ProviderClient, ProviderError};
use crate::domain::entities::{
    HistoryEvent, HistoryLookup, IdentifierKind, LookupPurpose, Provider, ProviderOrderInput,
    ProviderRecord, RecordField,
};
use crate::domain::matcher::{Comparison, MatchStep};
use crate::utils::time_format::parse_timestamp;

const PROVIDER: Provider = Provider::Dreamship;

/// Default public API host.
pub const DEFAULT_DREAMSHIP_BASE_URL: &str = "https://api.dreamship.com";

/// Cascade for Dreamship orders; the same for both lookup purposes.
pub const DREAMSHIP_STEPS: &[MatchStep] = &[
    MatchStep::new(IdentifierKind::OrderCode, RecordField::Code, Comparison::Equals),
    MatchStep::new(IdentifierKind::ReferenceId, RecordField::ExternalNumber, Comparison::Equals),
    MatchStep::new(IdentifierKind::ReferenceId, RecordField::ExternalNumber, Comparison::Contains),
];

/// Connection settings for [`DreamshipClient`].
#[derive(Debug, Clone)]
pub struct DreamshipSettings {
    pub base_url: String,
    pub access_token: String,
    /// Maximum number of in-flight requests of one bulk lookup.
    pub concurrency: usize,
}

/// Dreamship API client.
#[derive(Debug, Clone)]
pub struct DreamshipClient {
    client: Client,
    base_url: Url,
    access_token: String,
    concurrency: usize,
}

impl DreamshipClient {
    /// Creates a client sharing the given HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configuration`] for a blank token or an
    /// invalid base URL.
    pub fn new(client: Client, settings: &DreamshipSettings) -> Result<Self, ProviderError> {
        let base_url = parse_endpoint(PROVIDER, &settings.base_url, &settings.access_token)?;

        Ok(Self {
            client,
            base_url,
            access_token: settings.access_token.trim().to_string(),
            concurrency: settings.concurrency.max(1),
        })
    }

    /// `GET /v1/orders/{id}/`; a 404 means the order does not exist.
    async fn get_order(&self, order_id: &str) -> Result<Option<DreamshipOrder>, ProviderError> {
        let url = join_segments(PROVIDER, &self.base_url, &["v1", "orders", order_id, ""])?;

        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.access_token);

        let (status, body) = execute(request, PROVIDER, "get-order").await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(order_id, "Dreamship order not found");
            return Ok(None);
        }

        let body = ensure_success(PROVIDER, status, body)?;

        parse_json(PROVIDER, &body).map(Some)
    }

    /// `GET /v1/orders/?reference_id=`; the first listed order wins.
    async fn find_by_reference(
        &self,
        reference_id: &str,
    ) -> Result<Option<DreamshipOrder>, ProviderError> {
        let url = join_segments(PROVIDER, &self.base_url, &["v1", "orders", ""])?;

        let request = self
            .client
            .get(url)
            .query(&[("reference_id", reference_id)])
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.access_token);

        let (status, body) = execute(request, PROVIDER, "find-by-reference").await?;
        let body = ensure_success(PROVIDER, status, body)?;
        let page: DreamshipOrderPage = parse_json(PROVIDER, &body)?;

        Ok(page.data.into_iter().next())
    }

    async fn lookup_order(
        &self,
        input: &ProviderOrderInput,
    ) -> Result<Option<DreamshipOrder>, ProviderError> {
        if input.is_empty() {
            return Ok(None);
        }

        match input.kind {
            IdentifierKind::OrderCode => self.get_order(&input.value).await,
            IdentifierKind::ReferenceId | IdentifierKind::ExternalNumber => {
                self.find_by_reference(&input.value).await
            }
        }
    }
}

#[async_trait]
impl ProviderClient for DreamshipClient {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    fn match_steps(&self, _purpose: LookupPurpose) -> &'static [MatchStep] {
        DREAMSHIP_STEPS
    }

    async fn bulk_lookup_by_code(
        &self,
        inputs: &[ProviderOrderInput],
        _purpose: LookupPurpose,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        let lookups: Vec<_> = inputs
            .iter()
            .map(|input| self.lookup_by_reference(input))
            .collect();

        let orders: Vec<Option<ProviderRecord>> = stream::iter(lookups)
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let records: Vec<ProviderRecord> = orders.into_iter().flatten().collect();

        tracing::info!(
            provider = %PROVIDER,
            requested = inputs.len(),
            returned = records.len(),
            "Bulk lookup completed"
        );

        Ok(records)
    }

    async fn lookup_by_reference(
        &self,
        input: &ProviderOrderInput,
    ) -> Result<Option<ProviderRecord>, ProviderError> {
        Ok(self.lookup_order(input).await?.map(Into::into))
    }

    async fn fetch_latest_history_event(
        &self,
        order_code: &str,
        fulfillment_id: &str,
    ) -> Result<HistoryLookup, ProviderError> {
        let Some(order) = self.get_order(order_code.trim()).await? else {
            tracing::warn!(order_code, "Order not found while fetching shipment history");
            return Err(ProviderError::HistoryNotFound {
                provider: PROVIDER,
                reference: order_code.trim().to_string(),
            });
        };

        let Some(fulfillment) = order.fulfillment(fulfillment_id) else {
            tracing::warn!(order_code, fulfillment_id, "Fulfillment not found on order");
            return Err(ProviderError::HistoryNotFound {
                provider: PROVIDER,
                reference: format!("{}/{fulfillment_id}", order_code.trim()),
            });
        };

        let events = fulfillment.trackings.iter().filter_map(|tracking| {
            Some(HistoryEvent {
                timestamp: parse_timestamp(tracking.created_at.as_deref()?)?,
                location: tracking.carrier.as_deref().map(str::to_uppercase),
                status_message: tracking.status.clone(),
            })
        });

        Ok(HistoryLookup::from_events(events))
    }
}
