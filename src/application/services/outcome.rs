//! Per-line results of a pasted-text request.

use crate::domain::entities::{Provider, Row, RowError, RowStatus};

/// Final outcome of one pasted line.
#[derive(Debug, Clone)]
pub struct RowOutcome<T> {
    pub row: Row,
    /// Provider that produced the outcome; `None` for blank or unclassified lines.
    pub provider: Option<Provider>,
    pub outcome: Result<T, RowError>,
}

impl<T> RowOutcome<T> {
    /// Wraps an outcome and moves the row to its terminal status.
    pub fn new(mut row: Row, provider: Option<Provider>, outcome: Result<T, RowError>) -> Self {
        row.status = if outcome.is_ok() {
            RowStatus::Resolved
        } else {
            RowStatus::Failed
        };

        Self {
            row,
            provider,
            outcome,
        }
    }

    /// Outcome of a blank line; no provider is ever called for it.
    pub fn blank(row: Row) -> Self {
        Self::new(row, None, Err(RowError::NoInput))
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<String> {
        self.outcome.as_ref().err().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_outcome() {
        let ok = RowOutcome::new(Row::new(0, "RK-1"), Some(Provider::Merchize), Ok(()));
        assert_eq!(ok.row.status, RowStatus::Resolved);
        assert!(ok.error().is_none());

        let blank = RowOutcome::<()>::blank(Row::new(1, "  "));
        assert_eq!(blank.row.status, RowStatus::Failed);
        assert_eq!(blank.error().as_deref(), Some("no input"));
        assert!(blank.provider.is_none());
    }
}
