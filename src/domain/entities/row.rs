//! Row entity representing one pasted spreadsheet line.

use serde::Serialize;

/// Resolution progress of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    NotStarted,
    InFlight,
    Resolved,
    Failed,
}

/// One pasted input line.
///
/// `index` is the zero-based line position and never changes; results are
/// always reported back in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub raw: String,
    pub status: RowStatus,
}

impl Row {
    /// Creates a row that has not been dispatched yet.
    pub fn new(index: usize, raw: impl Into<String>) -> Self {
        Self {
            index,
            raw: raw.into(),
            status: RowStatus::NotStarted,
        }
    }

    /// The line with surrounding whitespace removed.
    pub fn value(&self) -> &str {
        self.raw.trim()
    }

    /// Returns true if the line is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value().is_empty()
    }
}

/// Splits pasted text into rows, one per line.
///
/// Blank lines are kept as placeholders so the number of rows always equals
/// the number of lines. A trailing `\r` from Windows clipboards is dropped.
/// Empty input yields no rows.
pub fn parse_rows(text: &str) -> Vec<Row> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .enumerate()
        .map(|(index, line)| Row::new(index, line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}
