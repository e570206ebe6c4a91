//! DTOs for the per-provider order-code endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use validator::Validate;

use crate::domain::entities::{ProviderOrderInput, Resolved, RowError};

/// `POST /api/merchize/order-code` request.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct MerchizeOrderCodeRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub orders: Vec<MerchizeOrderCodeItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MerchizeOrderCodeItem {
    /// Raw pasted line, echoed back.
    pub input: Option<String>,
    pub external_number: Option<String>,
    pub identifier: Option<String>,
}

impl MerchizeOrderCodeItem {
    pub fn to_input(&self) -> ProviderOrderInput {
        ProviderOrderInput::external_number(self.external_number.as_deref().unwrap_or_default())
            .with_identifier(self.identifier.clone())
    }
}

/// `POST /api/dreamship/order-code` request.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct DreamshipOrderCodeRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub orders: Vec<DreamshipOrderCodeItem>,
}

/// A Dreamship key sent either as a JSON string or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DreamshipKey {
    Text(String),
    Number(u64),
}

impl fmt::Display for DreamshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

pub(crate) fn key_text(key: Option<&DreamshipKey>) -> String {
    key.map(ToString::to_string).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DreamshipOrderCodeItem {
    pub input: Option<String>,
    pub reference_id: Option<DreamshipKey>,
}

impl DreamshipOrderCodeItem {
    pub fn to_input(&self) -> ProviderOrderInput {
        ProviderOrderInput::reference_id(key_text(self.reference_id.as_ref()))
    }
}

/// Response envelope of the per-provider endpoints.
///
/// `success` is false only when the provider call itself failed; row
/// failures are reported in `results`.
#[derive(Debug, Serialize)]
pub struct OrderResultsResponse<T> {
    pub success: bool,
    pub results: Vec<T>,
}

impl<T> OrderResultsResponse<T> {
    pub fn empty() -> Self {
        Self {
            success: true,
            results: Vec::new(),
        }
    }
}

/// One order-code result.
#[derive(Debug, Serialize)]
pub struct OrderCodeResultItem {
    pub input: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub code: Option<String>,
    pub status: Option<String>,
}

impl OrderCodeResultItem {
    pub fn new(input: Option<String>, result: Result<Resolved, RowError>) -> Self {
        let input = input.unwrap_or_default();

        match result {
            Ok(resolved) => Self {
                input,
                success: true,
                error: None,
                code: Some(resolved.value),
                status: resolved.status,
            },
            Err(error) => Self {
                input,
                success: false,
                error: Some(error.to_string()),
                code: None,
                status: None,
            },
        }
    }
}
