//! Resolution of marketplace order numbers to provider order codes.

use crate::application::services::outcome::RowOutcome;
use crate::application::services::provider_pass::{ProviderPass, run_pass};
use crate::application::services::provider_set::ProviderSet;
use crate::domain::entities::{
    LookupPurpose, MatchResult, Provider, ProviderOrderInput, ProviderRecord, Resolved, Row,
    RowError, RowStatus,
};

/// Turns a matched record into the order code shown to the user.
fn resolve_order_code(record: ProviderRecord) -> Result<Resolved, RowError> {
    let value = record
        .order_code()
        .ok_or(RowError::UnreadableCode)?
        .to_string();

    Ok(Resolved {
        value,
        status: record.status.clone(),
        record,
    })
}

/// Builds the lookup input of a pasted marketplace order number.
///
/// Merchize knows it as the external number, Dreamship as the reference id.
fn order_number_input(provider: Provider, value: &str) -> ProviderOrderInput {
    match provider {
        Provider::Dreamship => ProviderOrderInput::reference_id(value),
        Provider::Merchize | Provider::Printway => ProviderOrderInput::external_number(value),
    }
}

/// Merges the primary and (optional) secondary result of one row.
///
/// Preference: primary success, secondary success, secondary error, primary
/// error, not found.
fn merge(primary: MatchResult, secondary: Option<MatchResult>) -> MatchResult {
    if primary.is_resolved() {
        return primary;
    }

    match secondary {
        Some(secondary) if secondary.is_resolved() => secondary,
        Some(secondary) if secondary.outcome.is_err() => secondary,
        _ if primary.outcome.is_err() => primary,
        _ => MatchResult::failed(primary.provider, RowError::NotFound),
    }
}

/// Order-code lookups with cross-provider fallback.
#[derive(Clone)]
pub struct OrderCodeService {
    providers: ProviderSet,
}

impl OrderCodeService {
    pub fn new(providers: ProviderSet) -> Self {
        Self { providers }
    }

    /// Single-provider lookup, one result per input in input order.
    pub async fn lookup(
        &self,
        provider: Provider,
        inputs: &[ProviderOrderInput],
    ) -> ProviderPass<Resolved> {
        let Some(client) = self.providers.get(provider) else {
            return ProviderPass::rejected(provider, inputs, &RowError::UnsupportedProvider(provider));
        };

        run_pass(client, inputs, LookupPurpose::OrderCode)
            .await
            .and_then(resolve_order_code)
    }

    async fn pass(&self, provider: Provider, values: &[&str]) -> Vec<MatchResult> {
        let inputs: Vec<_> = values
            .iter()
            .map(|value| order_number_input(provider, value))
            .collect();

        self.lookup(provider, &inputs)
            .await
            .rows
            .into_iter()
            .map(|outcome| MatchResult { provider, outcome })
            .collect()
    }

    /// Resolves every pasted line, falling back to the other provider for the
    /// lines the primary one could not resolve.
    ///
    /// Returns exactly one outcome per row, in row order. At most two
    /// provider passes are made; the second one only carries the rows left
    /// unresolved by the first.
    pub async fn reconcile(&self, rows: Vec<Row>, primary: Provider) -> Vec<RowOutcome<Resolved>> {
        let mut rows = rows;
        let valid: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(position, _)| position)
            .collect();

        let mut merged: Vec<Option<MatchResult>> = vec![None; rows.len()];

        if !valid.is_empty() {
            for &position in &valid {
                rows[position].status = RowStatus::InFlight;
            }

            let values: Vec<&str> = valid.iter().map(|&p| rows[p].value()).collect();
            let primary_results = self.pass(primary, &values).await;

            let pending: Vec<usize> = primary_results
                .iter()
                .enumerate()
                .filter(|(_, result)| !result.is_resolved())
                .map(|(slot, _)| slot)
                .collect();

            let mut secondary_results: Vec<Option<MatchResult>> = vec![None; valid.len()];

            match primary.fallback_partner() {
                Some(secondary) if !pending.is_empty() => {
                    tracing::info!(
                        %primary,
                        %secondary,
                        rows = pending.len(),
                        "Falling back for unresolved rows"
                    );

                    let subset: Vec<&str> = pending.iter().map(|&slot| values[slot]).collect();
                    let results = self.pass(secondary, &subset).await;

                    for (slot, result) in pending.iter().zip(results) {
                        secondary_results[*slot] = Some(result);
                    }
                }
                _ => {}
            }

            for ((position, primary_result), secondary_result) in
                valid.iter().zip(primary_results).zip(secondary_results)
            {
                merged[*position] = Some(merge(primary_result, secondary_result));
            }
        }

        let outcomes: Vec<RowOutcome<Resolved>> = rows
            .into_iter()
            .zip(merged)
            .map(|(row, result)| match result {
                Some(result) => RowOutcome::new(row, Some(result.provider), result.outcome),
                None => RowOutcome::blank(row),
            })
            .collect();

        tracing::info!(
            %primary,
            total = outcomes.len(),
            resolved = outcomes.iter().filter(|o| o.is_success()).count(),
            "Order codes reconciled"
        );

        outcomes
    }
}
