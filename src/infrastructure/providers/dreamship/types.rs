//! Dreamship wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, DisplayFromStr, NoneAsEmptyString, PickFirst, serde_as};

use crate::domain::entities::{Provider, ProviderRecord, Tracking};

/// One shipment of a fulfillment. Also used as a history event.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamshipTracking {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<u64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub carrier: Option<String>,
    pub carrier_url: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamshipFulfillment {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<u64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub trackings: Vec<DreamshipTracking>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Dreamship order as returned by `GET /v1/orders/{id}/`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamshipOrder {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: u64,
    pub reference_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub fulfillments: Vec<DreamshipFulfillment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DreamshipOrder {
    /// First shipped tracking across fulfillments, with its fulfillment.
    fn first_tracking(&self) -> Option<(&DreamshipFulfillment, &DreamshipTracking)> {
        self.fulfillments.iter().find_map(|fulfillment| {
            fulfillment
                .trackings
                .first()
                .filter(|t| t.tracking_number.is_some())
                .map(|t| (fulfillment, t))
        })
    }

    /// Fulfillment with the given id.
    pub fn fulfillment(&self, fulfillment_id: &str) -> Option<&DreamshipFulfillment> {
        self.fulfillments
            .iter()
            .find(|f| f.id.is_some_and(|id| id.to_string() == fulfillment_id.trim()))
    }
}

impl From<DreamshipOrder> for ProviderRecord {
    fn from(order: DreamshipOrder) -> Self {
        let payload = serde_json::to_value(&order).unwrap_or_default();

        let shipped = order.first_tracking();
        let tracking = shipped.map(|(_, t)| Tracking {
            carrier: t.carrier.as_deref().map(str::to_uppercase),
            number: t.tracking_number.clone().unwrap_or_default(),
            url: t.tracking_url.clone(),
        });
        let fulfillment_id = shipped
            .map(|(f, _)| f)
            .or_else(|| order.fulfillments.first())
            .and_then(|f| f.id)
            .map(|id| id.to_string());

        let id = order.id.to_string();

        Self {
            code: Some(id.clone()),
            id: Some(id),
            external_number: order.reference_id,
            status: order.status,
            tracking,
            fulfillment_id,
            payload,
            ..Self::new(Provider::Dreamship)
        }
    }
}

/// Page returned by `GET /v1/orders/?reference_id=`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct DreamshipOrderPage {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub data: Vec<DreamshipOrder>,
}
