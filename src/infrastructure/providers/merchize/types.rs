//! Merchize wire types.
//!
//! Only the fields the reconciler reads are typed; everything else a package
//! carries lands in `extra` and is passed through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};

use crate::domain::entities::{IdentifierKind, Provider, ProviderOrderInput, ProviderRecord, Tracking};

// ============ Requests ============

/// Body of the external `list-orders-*` endpoints.
#[derive(Debug, Serialize)]
pub struct MerchizeOrdersRequest<'a> {
    pub orders: Vec<MerchizeOrderInput<'a>>,
}

/// One entry of [`MerchizeOrdersRequest`]; unused keys are sent as `""`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MerchizeOrderInput<'a> {
    pub code: &'a str,
    pub external_number: &'a str,
    pub identifier: &'a str,
}

impl<'a> From<&'a ProviderOrderInput> for MerchizeOrderInput<'a> {
    fn from(input: &'a ProviderOrderInput) -> Self {
        let external_number = match input.kind {
            IdentifierKind::ReferenceId => Some(input.value.as_str()),
            IdentifierKind::OrderCode | IdentifierKind::ExternalNumber => {
                input.key(IdentifierKind::ExternalNumber)
            }
        };

        Self {
            code: input.key(IdentifierKind::OrderCode).unwrap_or_default(),
            external_number: external_number.unwrap_or_default(),
            identifier: input.identifier.as_deref().unwrap_or_default(),
        }
    }
}

// ============ Responses ============

/// Envelope shared by Merchize endpoints.
#[derive(Debug, Deserialize)]
pub struct MerchizeResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Line item of a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchizeItem {
    pub sku: Option<String>,
    pub quantity: Option<u32>,
    pub product_type: Option<String>,
    pub variant_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fulfillment package returned by `list-orders-tracking`.
///
/// `name` is the fulfillment name, e.g. `RK-32344-92365-F1`; `_id` is the
/// fulfillment id used for shipment history.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchizePackage {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub service: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub has_tracking: bool,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tracking_company: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tracking_url: Option<String>,
    pub external_number: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub items: Vec<MerchizeItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MerchizePackage {
    /// Tracking of a shipped package; `None` until `has_tracking` is set.
    fn tracking(&self) -> Option<Tracking> {
        if !self.has_tracking {
            return None;
        }

        Some(Tracking {
            carrier: self.tracking_company.as_deref().map(|c| c.trim().to_string()),
            number: self
                .tracking_number
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            url: self.tracking_url.clone(),
        })
    }
}

impl From<MerchizePackage> for ProviderRecord {
    fn from(package: MerchizePackage) -> Self {
        let payload = serde_json::to_value(&package).unwrap_or_default();

        Self {
            tracking: package.tracking(),
            fulfillment_id: package.id.clone(),
            id: package.id,
            name: package.name,
            external_number: package.external_number,
            status: package.status,
            payload,
            ..Self::new(Provider::Merchize)
        }
    }
}

/// Order returned by `list-orders-detail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchizeOrderDetail {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub code: Option<String>,
    pub external_number: Option<String>,
    pub order_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<MerchizeOrderDetail> for ProviderRecord {
    fn from(detail: MerchizeOrderDetail) -> Self {
        let payload = serde_json::to_value(&detail).unwrap_or_default();

        Self {
            id: detail.id,
            code: detail.code,
            external_number: detail.external_number,
            status: detail.order_status.map(|s| s.trim().to_string()),
            payload,
            ..Self::new(Provider::Merchize)
        }
    }
}

/// `data` of the `search/v3` endpoint: either a bare list or a page object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MerchizeSearchData {
    Orders(Vec<MerchizeOrderDetail>),
    Page {
        #[serde(default, alias = "items")]
        orders: Vec<MerchizeOrderDetail>,
    },
}

impl MerchizeSearchData {
    pub fn into_orders(self) -> Vec<MerchizeOrderDetail> {
        match self {
            Self::Orders(orders) | Self::Page { orders } => orders,
        }
    }
}

/// One shipment-status event.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchizeShipmentEvent {
    pub time: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

/// `data` of the shipment-status endpoint: a bare event list or an object
/// holding the list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MerchizeShipmentStatus {
    Events(Vec<MerchizeShipmentEvent>),
    Detail {
        #[serde(default, alias = "histories", alias = "events")]
        history: Vec<MerchizeShipmentEvent>,
    },
}

impl MerchizeShipmentStatus {
    pub fn into_events(self) -> Vec<MerchizeShipmentEvent> {
        match self {
            Self::Events(events) | Self::Detail { history: events } => events,
        }
    }
}
