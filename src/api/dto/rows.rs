//! DTOs for the pasted-text endpoints (`/api/order-codes`, `/api/tracking`).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::track::HistoryColumns;
use crate::application::services::{RowOutcome, TrackedOrder};
use crate::domain::entities::{Platform, Provider, Resolved};

/// Limit on pasted text, in characters.
const MAX_TEXT_CHARS: usize = 200_000;

fn validate_text_length(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        let mut error = ValidationError::new("text_too_long");
        error.message = Some(format!("text exceeds {MAX_TEXT_CHARS} characters").into());
        return Err(error);
    }
    Ok(())
}

fn validate_primary(primary: &Provider) -> Result<(), ValidationError> {
    if *primary == Provider::Printway {
        let mut error = ValidationError::new("unsupported_primary");
        error.message = Some("primary must be merchize or dreamship".into());
        return Err(error);
    }
    Ok(())
}

/// `POST /api/order-codes` request.
#[derive(Debug, Deserialize, Validate)]
pub struct OrderCodesRequest {
    /// Pasted spreadsheet column, one identifier per line.
    #[serde(default)]
    #[validate(custom(function = "validate_text_length"))]
    pub text: String,

    /// Provider queried first (default: Merchize).
    #[validate(custom(function = "validate_primary"))]
    pub primary: Option<Provider>,
}

/// `POST /api/tracking` request.
#[derive(Debug, Deserialize, Validate)]
pub struct TrackingRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_text_length"))]
    pub text: String,

    #[serde(default)]
    pub platform: Platform,
}

/// Response of the pasted-text endpoints.
#[derive(Debug, Serialize)]
pub struct RowsResponse<T> {
    pub total: usize,
    pub non_empty: usize,
    pub resolved: usize,
    pub rows: Vec<T>,
}

impl<T> RowsResponse<T> {
    pub fn new<U>(outcomes: Vec<RowOutcome<U>>, to_row: impl FnMut(RowOutcome<U>) -> T) -> Self {
        let total = outcomes.len();
        let non_empty = outcomes.iter().filter(|o| !o.row.is_blank()).count();
        let resolved = outcomes.iter().filter(|o| o.is_success()).count();

        Self {
            total,
            non_empty,
            resolved,
            rows: outcomes.into_iter().map(to_row).collect(),
        }
    }
}

/// One order-code row.
#[derive(Debug, Serialize)]
pub struct OrderCodeRow {
    pub index: usize,
    pub input: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RowOutcome<Resolved>> for OrderCodeRow {
    fn from(outcome: RowOutcome<Resolved>) -> Self {
        let error = outcome.error();
        let (code, status) = match outcome.outcome {
            Ok(resolved) => (Some(resolved.value), resolved.status),
            Err(_) => (None, None),
        };

        Self {
            index: outcome.row.index,
            success: error.is_none(),
            input: outcome.row.raw,
            provider: outcome.provider,
            code,
            status,
            error,
        }
    }
}

/// One tracking row.
#[derive(Debug, Serialize)]
pub struct TrackingRow {
    pub index: usize,
    pub input: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(flatten)]
    pub history: HistoryColumns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RowOutcome<TrackedOrder>> for TrackingRow {
    fn from(outcome: RowOutcome<TrackedOrder>) -> Self {
        let index = outcome.row.index;
        let input = outcome.row.raw;
        let platform = outcome.provider;

        match outcome.outcome {
            Ok(tracked) => Self {
                index,
                input,
                success: true,
                platform,
                tracking: Some(tracked.tracking_number().to_string()),
                carrier: tracked.carrier().map(ToString::to_string),
                history: HistoryColumns::from_lookup(tracked.history.as_ref()),
                error: tracked.history_error,
            },
            Err(error) => Self {
                index,
                input,
                success: false,
                platform,
                tracking: None,
                carrier: None,
                history: HistoryColumns::default(),
                error: Some(error.to_string()),
            },
        }
    }
}
