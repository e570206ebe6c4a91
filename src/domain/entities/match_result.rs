//! Per-row outcomes of a provider pass.

use super::order_input::IdentifierKind;
use super::provider::Provider;
use super::record::ProviderRecord;

/// Why a single row could not be resolved.
///
/// Row errors are always reported inside the row's result; none of them
/// aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("no input")]
    NoInput,

    #[error("missing {0}")]
    MissingIdentifier(&'static str),

    #[error("no corresponding order found")]
    NotFound,

    #[error("could not read order code")]
    UnreadableCode,

    #[error("{0} is not supported")]
    UnsupportedProvider(Provider),

    #[error("could not detect provider")]
    UndetectedProvider,

    /// Batch-level provider failure broadcast to the row, message verbatim.
    #[error("{0}")]
    Provider(String),
}

impl RowError {
    /// Missing-identifier error naming the identifier the row needed.
    pub fn missing(kind: IdentifierKind) -> Self {
        Self::MissingIdentifier(match kind {
            IdentifierKind::OrderCode => "order code",
            IdentifierKind::ReferenceId => "reference_id",
            IdentifierKind::ExternalNumber => "external_number",
        })
    }
}

/// A row matched to a provider record.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Order code or tracking number; may be empty (e.g. not shipped yet).
    pub value: String,
    pub status: Option<String>,
    pub record: ProviderRecord,
}

/// Outcome of reconciling one row against one provider pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub provider: Provider,
    pub outcome: Result<Resolved, RowError>,
}

impl MatchResult {
    pub fn resolved(provider: Provider, resolved: Resolved) -> Self {
        Self {
            provider,
            outcome: Ok(resolved),
        }
    }

    pub fn failed(provider: Provider, error: RowError) -> Self {
        Self {
            provider,
            outcome: Err(error),
        }
    }

    /// Successful with a non-empty value.
    pub fn is_resolved(&self) -> bool {
        self.outcome
            .as_ref()
            .is_ok_and(|resolved| !resolved.value.trim().is_empty())
    }

    /// The row error message, if the pass failed.
    pub fn error(&self) -> Option<String> {
        self.outcome.as_ref().err().map(ToString::to_string)
    }
}
