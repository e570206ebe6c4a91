//! Merchize provider client.
//!
//! Merchize exposes bulk endpoints keyed by order code / external number and
//! answers with an unordered list of orders or fulfillment packages.

mod types;

pub use types::{MerchizeOrderDetail, MerchizePackage};

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use self::types::{
    MerchizeOrdersRequest, MerchizeResponse, MerchizeSearchData, MerchizeShipmentStatus,
};
use super::http::{self, ensure_success, execute, join_segments, parse_endpoint};
use crate::domain::clients::{ProviderClient, ProviderError};
use crate::domain::entities::{
    HistoryEvent, HistoryLookup, IdentifierKind, LookupPurpose, Provider, ProviderOrderInput,
    ProviderRecord, RecordField,
};
use crate::domain::matcher::{Comparison, MatchStep, match_batch};
use crate::utils::code_normalizer::strip_fulfillment_suffix;
use crate::utils::time_format::parse_timestamp;

const PROVIDER: Provider = Provider::Merchize;

const LIST_ORDERS_DETAIL: &[&str] = &["order", "external", "orders", "list-orders-detail"];
const LIST_ORDERS_TRACKING: &[&str] = &["order", "external", "orders", "list-orders-tracking"];
const SEARCH_ORDERS: &[&str] = &["order", "orders", "search", "v3"];

/// Cascade for `list-orders-detail` results.
pub const MERCHIZE_DETAIL_STEPS: &[MatchStep] = &[
    MatchStep::new(IdentifierKind::ExternalNumber, RecordField::ExternalNumber, Comparison::Equals),
    MatchStep::new(IdentifierKind::ExternalNumber, RecordField::Code, Comparison::Contains),
];

/// Cascade for `list-orders-tracking` packages.
pub const MERCHIZE_TRACKING_STEPS: &[MatchStep] = &[
    MatchStep::new(IdentifierKind::OrderCode, RecordField::BaseName, Comparison::Equals),
    MatchStep::new(IdentifierKind::OrderCode, RecordField::Name, Comparison::StartsWith),
    MatchStep::new(IdentifierKind::ExternalNumber, RecordField::ExternalNumber, Comparison::Equals),
    MatchStep::new(IdentifierKind::ExternalNumber, RecordField::Name, Comparison::Contains),
];

/// Connection settings for [`MerchizeClient`].
#[derive(Debug, Clone)]
pub struct MerchizeSettings {
    pub base_url: String,
    pub access_token: String,
    /// Maximum number of orders per bulk request.
    pub batch_size: usize,
}

/// Merchize API client.
#[derive(Debug, Clone)]
pub struct MerchizeClient {
    client: Client,
    base_url: Url,
    access_token: String,
    batch_size: usize,
}

impl MerchizeClient {
    /// Creates a client sharing the given HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configuration`] for a blank token or an
    /// invalid base URL.
    pub fn new(client: Client, settings: &MerchizeSettings) -> Result<Self, ProviderError> {
        let base_url = parse_endpoint(PROVIDER, &settings.base_url, &settings.access_token)?;

        Ok(Self {
            client,
            base_url,
            access_token: settings.access_token.trim().to_string(),
            batch_size: settings.batch_size.max(1),
        })
    }

    /// Unwraps the `{success, message, data}` envelope.
    fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ProviderError> {
        let envelope: MerchizeResponse<T> = http::parse_json(PROVIDER, body)?;

        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("{PROVIDER} API returned an error"));

            tracing::warn!(provider = %PROVIDER, %message, "Upstream rejected the request");

            return Err(ProviderError::Rejected {
                provider: PROVIDER,
                message,
            });
        }

        Ok(envelope.data)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        action: &str,
    ) -> Result<Option<T>, ProviderError> {
        let url = join_segments(PROVIDER, &self.base_url, segments)?;

        let request = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.access_token);

        let (status, body) = execute(request, PROVIDER, action).await?;
        let body = ensure_success(PROVIDER, status, body)?;

        Self::unwrap_envelope(&body)
    }

    /// One `list-orders-*` call for at most `batch_size` inputs.
    async fn post_orders<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        inputs: &[ProviderOrderInput],
    ) -> Result<Vec<T>, ProviderError> {
        let url = join_segments(PROVIDER, &self.base_url, segments)?;
        let payload = MerchizeOrdersRequest {
            orders: inputs.iter().map(Into::into).collect(),
        };

        let request = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&payload);

        let action = segments.last().copied().unwrap_or_default();
        let (status, body) = execute(request, PROVIDER, action).await?;
        let body = ensure_success(PROVIDER, status, body)?;

        Ok(Self::unwrap_envelope::<Vec<T>>(&body)?.unwrap_or_default())
    }

    /// Splits `inputs` into sub-batches issued concurrently.
    ///
    /// One failed sub-batch fails the whole call.
    async fn post_orders_chunked<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        inputs: &[ProviderOrderInput],
    ) -> Result<Vec<T>, ProviderError> {
        let batches = inputs
            .chunks(self.batch_size)
            .map(|chunk| self.post_orders::<T>(segments, chunk));

        let responses = try_join_all(batches).await?;

        Ok(responses.into_iter().flatten().collect())
    }

    /// Finds an order by its Merchize order code.
    async fn search_order(&self, code: &str) -> Result<Option<MerchizeOrderDetail>, ProviderError> {
        let data: Option<MerchizeSearchData> = self
            .get(SEARCH_ORDERS, &[("code", code)], "search-order")
            .await?;

        let mut orders = data.map(MerchizeSearchData::into_orders).unwrap_or_default();

        // Search is fuzzy; prefer the exact code, else the first hit.
        let exact = orders.iter().position(|order| {
            order
                .code
                .as_deref()
                .map(strip_fulfillment_suffix)
                .is_some_and(|c| c.eq_ignore_ascii_case(strip_fulfillment_suffix(code.trim())))
        });

        Ok(match exact {
            Some(index) => Some(orders.swap_remove(index)),
            None => orders.into_iter().next(),
        })
    }
}

#[async_trait]
impl ProviderClient for MerchizeClient {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    fn match_steps(&self, purpose: LookupPurpose) -> &'static [MatchStep] {
        match purpose {
            LookupPurpose::OrderCode => MERCHIZE_DETAIL_STEPS,
            LookupPurpose::Tracking => MERCHIZE_TRACKING_STEPS,
        }
    }

    async fn bulk_lookup_by_code(
        &self,
        inputs: &[ProviderOrderInput],
        purpose: LookupPurpose,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<ProviderRecord> = match purpose {
            LookupPurpose::OrderCode => self
                .post_orders_chunked::<MerchizeOrderDetail>(LIST_ORDERS_DETAIL, inputs)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            LookupPurpose::Tracking => self
                .post_orders_chunked::<MerchizePackage>(LIST_ORDERS_TRACKING, inputs)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };

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
        if input.is_empty() {
            return Ok(None);
        }

        match input.kind {
            IdentifierKind::OrderCode => {
                Ok(self.search_order(&input.value).await?.map(Into::into))
            }
            IdentifierKind::ExternalNumber => {
                let inputs = std::slice::from_ref(input);
                let records = self
                    .post_orders::<MerchizeOrderDetail>(LIST_ORDERS_DETAIL, inputs)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();

                Ok(match_batch(inputs, records, MERCHIZE_DETAIL_STEPS)
                    .into_iter()
                    .next()
                    .and_then(Result::ok))
            }
            IdentifierKind::ReferenceId => {
                tracing::debug!(value = %input.value, "Merchize has no reference id namespace");
                Ok(None)
            }
        }
    }

    async fn fetch_latest_history_event(
        &self,
        order_code: &str,
        fulfillment_id: &str,
    ) -> Result<HistoryLookup, ProviderError> {
        let Some(order_id) = self.search_order(order_code).await?.and_then(|o| o.id) else {
            tracing::warn!(order_code, "Order not found while fetching shipment history");
            return Err(ProviderError::HistoryNotFound {
                provider: PROVIDER,
                reference: order_code.trim().to_string(),
            });
        };

        let segments = [
            "order",
            "orders",
            order_id.as_str(),
            "fulfillments",
            fulfillment_id,
            "shipment-status",
        ];

        let status: Option<MerchizeShipmentStatus> =
            self.get(&segments, &[], "shipment-status").await?;

        let events = status
            .map(MerchizeShipmentStatus::into_events)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|event| {
                let timestamp = parse_timestamp(event.time.as_deref()?)?;
                Some(HistoryEvent {
                    timestamp,
                    location: event.location,
                    status_message: event.message,
                })
            });

        Ok(HistoryLookup::from_events(events))
    }
}
