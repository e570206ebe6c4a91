//! One bulk pass of a batch of inputs against one provider.

use crate::domain::clients::{ProviderClient, ProviderError};
use crate::domain::entities::{LookupPurpose, Provider, ProviderOrderInput, ProviderRecord, RowError};
use crate::domain::matcher::match_batch;

/// Result of a provider pass, one entry per input in input order.
///
/// When the provider call failed, `failure` holds the error and every
/// non-blank input carries its message as [`RowError::Provider`].
#[derive(Debug, Clone)]
pub struct ProviderPass<T> {
    pub provider: Provider,
    pub failure: Option<ProviderError>,
    pub rows: Vec<Result<T, RowError>>,
}

impl<T> ProviderPass<T> {
    /// Fails every input with the same error, without calling a provider.
    pub fn rejected(provider: Provider, inputs: &[ProviderOrderInput], error: &RowError) -> Self {
        Self {
            provider,
            failure: None,
            rows: inputs.iter().map(|_| Err(error.clone())).collect(),
        }
    }

    /// Maps every successful row, possibly failing it.
    pub fn and_then<U>(self, mut f: impl FnMut(T) -> Result<U, RowError>) -> ProviderPass<U> {
        ProviderPass {
            provider: self.provider,
            failure: self.failure,
            rows: self.rows.into_iter().map(|row| row.and_then(&mut f)).collect(),
        }
    }

    /// True if the provider call itself succeeded.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Queries `client` for the non-blank inputs and matches the response back.
///
/// Blank inputs are never sent and fail with a missing-identifier error.
pub async fn run_pass(
    client: &dyn ProviderClient,
    inputs: &[ProviderOrderInput],
    purpose: LookupPurpose,
) -> ProviderPass<ProviderRecord> {
    let provider = client.provider();
    let queried: Vec<ProviderOrderInput> = inputs.iter().filter(|i| !i.is_empty()).cloned().collect();

    if queried.is_empty() {
        return ProviderPass {
            provider,
            failure: None,
            rows: inputs.iter().map(|i| Err(RowError::missing(i.kind))).collect(),
        };
    }

    match client.bulk_lookup_by_code(&queried, purpose).await {
        Ok(records) => {
            let rows = match_batch(inputs, records, client.match_steps(purpose));

            tracing::info!(
                %provider,
                rows = inputs.len(),
                matched = rows.iter().filter(|r| r.is_ok()).count(),
                "Provider pass completed"
            );

            ProviderPass {
                provider,
                failure: None,
                rows,
            }
        }
        Err(error) => {
            tracing::warn!(%provider, rows = queried.len(), error = %error, "Provider pass failed");

            let message = error.to_string();
            let rows = inputs
                .iter()
                .map(|input| {
                    if input.is_empty() {
                        Err(RowError::missing(input.kind))
                    } else {
                        Err(RowError::Provider(message.clone()))
                    }
                })
                .collect();

            ProviderPass {
                provider,
                failure: Some(error),
                rows,
            }
        }
    }
}
