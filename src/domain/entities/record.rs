//! Provider-agnostic view of a package or order returned by a provider.

use serde::Serialize;

use super::provider::Provider;
use crate::utils::code_normalizer::{non_blank, strip_fulfillment_suffix};

/// Shipment tracking attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tracking {
    pub carrier: Option<String>,
    pub number: String,
    pub url: Option<String>,
}

/// Comparable fields of a [`ProviderRecord`] addressed by match steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    ExternalNumber,
    Code,
    /// `Code` with a trailing `-F<digits>` removed.
    BaseCode,
    Name,
    /// `Name` with a trailing `-F<digits>` removed.
    BaseName,
}

/// One package/order object returned by a provider.
///
/// Every field is optional because the upstream payloads are loosely
/// populated; [`ProviderRecord::field`] reports an absent or blank field as
/// `None`. `payload` is the typed provider object re-serialized, passed
/// through to callers that display the raw package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRecord {
    pub provider: Provider,
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub external_number: Option<String>,
    pub status: Option<String>,
    pub tracking: Option<Tracking>,
    pub fulfillment_id: Option<String>,
    pub payload: serde_json::Value,
}

impl ProviderRecord {
    /// Creates an empty record for a provider; fields are filled by the client.
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            id: None,
            code: None,
            name: None,
            external_number: None,
            status: None,
            tracking: None,
            fulfillment_id: None,
            payload: serde_json::Value::Null,
        }
    }

    /// Returns the trimmed value of a comparable field, `None` if absent or blank.
    pub fn field(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::ExternalNumber => self.external_number.as_deref(),
            RecordField::Code => self.code.as_deref(),
            RecordField::BaseCode => self.code.as_deref().map(strip_fulfillment_suffix),
            RecordField::Name => self.name.as_deref(),
            RecordField::BaseName => self.name.as_deref().map(strip_fulfillment_suffix),
        }?;

        non_blank(value)
    }

    /// The order code a spreadsheet row should receive: the trimmed code as
    /// returned upstream, falling back to the base of the package name.
    pub fn order_code(&self) -> Option<&str> {
        self.field(RecordField::Code)
            .or_else(|| self.field(RecordField::BaseName))
    }

    /// The order code without any fulfillment suffix, used to find the parent
    /// order of a package.
    pub fn base_order_code(&self) -> Option<&str> {
        self.field(RecordField::BaseCode)
            .or_else(|| self.field(RecordField::BaseName))
    }

    /// The tracking number, empty when the package has not shipped yet.
    pub fn tracking_number(&self) -> &str {
        self.tracking.as_ref().map_or("", |t| t.number.as_str())
    }
}
