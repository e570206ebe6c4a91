//! DTOs for the per-provider tracking endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};
use validator::Validate;

use crate::api::dto::order_code::{DreamshipKey, key_text};
use crate::application::services::TrackedOrder;
use crate::domain::entities::{
    HistoryLookup, IdentifierKind, NO_HISTORY_MESSAGE, Provider, ProviderOrderInput, RowError,
};
use crate::utils::code_normalizer::non_blank;

/// `POST /api/merchize/track` request.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct MerchizeTrackRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub orders: Vec<MerchizeTrackItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MerchizeTrackItem {
    pub input: Option<String>,
    pub code: Option<String>,
    pub external_number: Option<String>,
    pub identifier: Option<String>,
}

impl MerchizeTrackItem {
    /// Looks up by order code when one is given, with the external number as
    /// a second key; else by external number alone.
    pub fn to_input(&self) -> ProviderOrderInput {
        let external_number = self.external_number.as_deref();

        let input = match self.code.as_deref().and_then(non_blank) {
            Some(code) => ProviderOrderInput::order_code(code)
                .with_alternate(IdentifierKind::ExternalNumber, external_number),
            None => ProviderOrderInput::external_number(external_number.unwrap_or_default()),
        };

        input.with_identifier(self.identifier.clone())
    }
}

/// `POST /api/dreamship/track` request.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct DreamshipTrackRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub orders: Vec<DreamshipTrackItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DreamshipTrackItem {
    pub input: Option<String>,
    /// Dreamship order id, e.g. `322265507`.
    pub id: Option<DreamshipKey>,
}

impl DreamshipTrackItem {
    pub fn to_input(&self) -> ProviderOrderInput {
        ProviderOrderInput::order_code(key_text(self.id.as_ref()))
    }
}

/// `time` / `address` / `statusOrder` columns of a tracked row.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct HistoryColumns {
    pub time: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "statusOrder")]
    pub status_order: Option<String>,
}

impl HistoryColumns {
    pub fn from_lookup(history: Option<&HistoryLookup>) -> Self {
        match history {
            Some(HistoryLookup::Latest(event)) => Self {
                time: Some(event.day_month()),
                address: event.location.clone(),
                status_order: event.status_message.clone(),
            },
            Some(HistoryLookup::NoHistory) => Self {
                status_order: Some(NO_HISTORY_MESSAGE.to_string()),
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}

/// One tracking result.
///
/// The raw provider object is returned as `pkg` for Merchize and as `order`
/// for Dreamship.
#[derive(Debug, Serialize)]
pub struct TrackResultItem {
    pub input: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    pub tracking: Option<String>,
    pub carrier: Option<String>,
    #[serde(flatten)]
    pub history: HistoryColumns,
}

impl TrackResultItem {
    pub fn new(input: Option<String>, result: Result<TrackedOrder, RowError>) -> Self {
        let input = input.unwrap_or_default();

        match result {
            Ok(tracked) => {
                let history = HistoryColumns::from_lookup(tracked.history.as_ref());
                let tracking = Some(tracked.tracking_number().to_string());
                let carrier = tracked.carrier().map(ToString::to_string);
                let payload = tracked.record.payload;

                let (pkg, order) = match tracked.record.provider {
                    Provider::Dreamship => (None, Some(payload)),
                    Provider::Merchize | Provider::Printway => (Some(payload), None),
                };

                Self {
                    input,
                    success: true,
                    error: tracked.history_error,
                    pkg,
                    order,
                    tracking,
                    carrier,
                    history,
                }
            }
            Err(error) => Self {
                input,
                success: false,
                error: Some(error.to_string()),
                pkg: None,
                order: None,
                tracking: None,
                carrier: None,
                history: HistoryColumns::default(),
            },
        }
    }
}
