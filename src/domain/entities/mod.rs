//! Core domain entities.
//!
//! Entities are plain data structures; the only behaviour they carry is
//! field extraction and small predicates used by the matcher and services.
//!
//! # Entity Types
//!
//! - [`Row`] - One pasted spreadsheet line
//! - [`ProviderOrderInput`] - A normalized identifier sent to a provider
//! - [`ProviderRecord`] - A package/order returned by a provider
//! - [`MatchResult`] - Outcome of one row against one provider pass
//! - [`HistoryEvent`] / [`HistoryLookup`] - Latest shipment status of a fulfillment

pub mod history;
pub mod match_result;
pub mod order_input;
pub mod provider;
pub mod record;
pub mod row;

pub use history::{HistoryEvent, HistoryLookup, NO_HISTORY_MESSAGE};
pub use match_result::{MatchResult, Resolved, RowError};
pub use order_input::{IdentifierKind, LookupPurpose, ProviderOrderInput};
pub use provider::{Platform, Provider};
pub use record::{ProviderRecord, RecordField, Tracking};
pub use row::{Row, RowStatus, parse_rows};
