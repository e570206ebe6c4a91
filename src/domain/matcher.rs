//! Batch matching of request rows against an unordered provider response.
//!
//! Bulk provider endpoints return a set of packages that is neither ordered
//! like the request nor guaranteed complete. Each request row is assigned at
//! most one record by walking a provider-specific cascade of
//! [`MatchStep`]s; the first step that finds an unclaimed candidate wins.
//!
//! # Exclusivity
//!
//! A claimed candidate is tagged as taken in the [`CandidatePool`] and can
//! never satisfy a later row of the same pass. Rows are processed in request
//! order, so earlier rows have priority when several records satisfy the
//! same fuzzy rule. Among candidates, the first remaining one in provider
//! response order wins.

use crate::domain::entities::{IdentifierKind, ProviderOrderInput, ProviderRecord, RecordField, RowError};

/// Case-insensitive comparison between a row key and a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    /// The field starts with the row key.
    StartsWith,
    /// The field contains the row key.
    Contains,
}

impl Comparison {
    fn holds(self, field: &str, key: &str) -> bool {
        let field = field.to_lowercase();
        let key = key.to_lowercase();

        match self {
            Self::Equals => field == key,
            Self::StartsWith => field.starts_with(&key),
            Self::Contains => field.contains(&key),
        }
    }
}

/// One rule of a matching cascade.
///
/// The step only applies to rows that carry a key of kind `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStep {
    pub key: IdentifierKind,
    pub field: RecordField,
    pub comparison: Comparison,
}

impl MatchStep {
    pub const fn new(key: IdentifierKind, field: RecordField, comparison: Comparison) -> Self {
        Self {
            key,
            field,
            comparison,
        }
    }

    fn matches(&self, input: &ProviderOrderInput, record: &ProviderRecord) -> bool {
        input.key(self.key).is_some_and(|key| {
            record
                .field(self.field)
                .is_some_and(|field| self.comparison.holds(field, key))
        })
    }
}

/// Candidates of one matching pass, addressed by index.
///
/// Claiming takes ownership of the candidate out of its slot; the slot stays
/// in place so indices never shift.
#[derive(Debug)]
pub struct CandidatePool<T> {
    slots: Vec<Option<T>>,
}

impl<T> CandidatePool<T> {
    pub fn new(candidates: Vec<T>) -> Self {
        Self {
            slots: candidates.into_iter().map(Some).collect(),
        }
    }

    /// Claims the first unclaimed candidate satisfying `predicate`.
    pub fn claim_first(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(&mut predicate))
            .and_then(Option::take)
    }

    /// Number of candidates not claimed yet.
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Assigns each input at most one record.
///
/// Returns one entry per input, in input order:
/// - [`RowError::MissingIdentifier`] for blank inputs
/// - [`RowError::NotFound`] when no step matched an unclaimed record
pub fn match_batch(
    inputs: &[ProviderOrderInput],
    records: Vec<ProviderRecord>,
    steps: &[MatchStep],
) -> Vec<Result<ProviderRecord, RowError>> {
    let mut pool = CandidatePool::new(records);

    let results = inputs
        .iter()
        .map(|input| {
            if input.is_empty() {
                return Err(RowError::missing(input.kind));
            }

            steps
                .iter()
                .filter(|step| input.key(step.key).is_some())
                .find_map(|step| pool.claim_first(|record| step.matches(input, record)))
                .ok_or(RowError::NotFound)
        })
        .collect();

    tracing::debug!(unclaimed = pool.remaining(), "Batch matching finished");

    results
}
