//! Tracking lookups with shipment-history enrichment.
//!
//! Pasted lines are classified (or assigned the chosen platform), grouped by
//! provider and queried concurrently. Every matched row then gets the
//! latest shipment-status event of its fulfillment; those calls run
//! concurrently as well. There is no cross-provider fallback here.

use futures::future::join_all;

use crate::application::services::outcome::RowOutcome;
use crate::application::services::provider_pass::{ProviderPass, run_pass};
use crate::application::services::provider_set::ProviderSet;
use crate::domain::classifier::classify;
use crate::domain::clients::ProviderClient;
use crate::domain::entities::{
    HistoryLookup, LookupPurpose, Platform, Provider, ProviderOrderInput,
    ProviderRecord, Row, RowError, RowStatus,
};

/// A matched package/order with its tracking and latest history event.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedOrder {
    pub record: ProviderRecord,
    /// `None` when the history lookup failed; see `history_error`.
    pub history: Option<HistoryLookup>,
    pub history_error: Option<String>,
}

impl TrackedOrder {
    /// Tracking number, empty while the package has not shipped.
    pub fn tracking_number(&self) -> &str {
        self.record.tracking_number()
    }

    pub fn carrier(&self) -> Option<&str> {
        self.record
            .tracking
            .as_ref()
            .and_then(|t| t.carrier.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// Builds the tracking input of a pasted identifier for a provider.
///
/// Values shaped like the provider's own order code are looked up as such;
/// anything else is treated as the marketplace order number.
fn tracking_input(provider: Provider, value: &str) -> ProviderOrderInput {
    let own_code = classify(value) == Some(provider);

    match (provider, own_code) {
        (_, true) => ProviderOrderInput::order_code(value),
        (Provider::Dreamship, false) => ProviderOrderInput::reference_id(value),
        (Provider::Merchize | Provider::Printway, false) => ProviderOrderInput::external_number(value),
    }
}

/// Fetches the latest history event of a matched record.
async fn enrich(
    client: &dyn ProviderClient,
    input: &ProviderOrderInput,
    record: ProviderRecord,
) -> TrackedOrder {
    let Some(fulfillment_id) = record.fulfillment_id.clone() else {
        return TrackedOrder {
            record,
            history: Some(HistoryLookup::NoHistory),
            history_error: None,
        };
    };

    let order_code = record
        .base_order_code()
        .map_or_else(|| input.value.clone(), ToString::to_string);

    match client
        .fetch_latest_history_event(&order_code, &fulfillment_id)
        .await
    {
        Ok(history) => TrackedOrder {
            record,
            history: Some(history),
            history_error: None,
        },
        Err(error) => {
            tracing::warn!(
                provider = %client.provider(),
                %order_code,
                error = %error,
                "Shipment history lookup failed"
            );
            TrackedOrder {
                record,
                history: None,
                history_error: Some(error.to_string()),
            }
        }
    }
}

/// Tracking lookups, per provider or across pasted lines.
#[derive(Clone)]
pub struct TrackingService {
    providers: ProviderSet,
}

impl TrackingService {
    pub fn new(providers: ProviderSet) -> Self {
        Self { providers }
    }

    /// Single-provider tracking lookup, one result per input in input order.
    ///
    /// A history failure leaves the row successful with `history_error` set.
    pub async fn track(
        &self,
        provider: Provider,
        inputs: &[ProviderOrderInput],
    ) -> ProviderPass<TrackedOrder> {
        let Some(client) = self.providers.get(provider) else {
            return ProviderPass::rejected(provider, inputs, &RowError::UnsupportedProvider(provider));
        };

        let pass = run_pass(client, inputs, LookupPurpose::Tracking).await;

        let enriched = join_all(pass.rows.into_iter().zip(inputs).map(|(row, input)| async move {
            match row {
                Ok(record) => Ok(enrich(client, input, record).await),
                Err(error) => Err(error),
            }
        }))
        .await;

        ProviderPass {
            provider: pass.provider,
            failure: pass.failure,
            rows: enriched,
        }
    }

    /// Tracks every pasted line.
    ///
    /// With [`Platform::Auto`] each line is classified; otherwise every
    /// non-blank line goes to the chosen provider. Returns exactly one outcome
    /// per row, in row order.
    pub async fn track_rows(&self, rows: Vec<Row>, platform: Platform) -> Vec<RowOutcome<TrackedOrder>> {
        let mut rows = rows;
        let mut outcomes: Vec<Option<(Option<Provider>, Result<TrackedOrder, RowError>)>> =
            vec![None; rows.len()];

        let mut groups: Vec<(Provider, Vec<usize>)> = Vec::new();

        for (position, row) in rows.iter_mut().enumerate() {
            if row.is_blank() {
                continue;
            }

            let Some(provider) = platform.fixed().or_else(|| classify(row.value())) else {
                outcomes[position] = Some((None, Err(RowError::UndetectedProvider)));
                continue;
            };

            if self.providers.get(provider).is_none() {
                outcomes[position] = Some((Some(provider), Err(RowError::UnsupportedProvider(provider))));
                continue;
            }

            row.status = RowStatus::InFlight;

            match groups.iter_mut().find(|(p, _)| *p == provider) {
                Some((_, positions)) => positions.push(position),
                None => groups.push((provider, vec![position])),
            }
        }

        let batches = groups.iter().map(|(provider, positions)| {
            let inputs: Vec<ProviderOrderInput> = positions
                .iter()
                .map(|&p| tracking_input(*provider, rows[p].value()))
                .collect();

            async move { self.track(*provider, &inputs).await }
        });

        let passes = join_all(batches).await;

        for ((provider, positions), pass) in groups.iter().zip(passes) {
            for (&position, result) in positions.iter().zip(pass.rows) {
                outcomes[position] = Some((Some(*provider), result));
            }
        }

        let outcomes: Vec<RowOutcome<TrackedOrder>> = rows
            .into_iter()
            .zip(outcomes)
            .map(|(row, outcome)| match outcome {
                Some((provider, result)) => RowOutcome::new(row, provider, result),
                None => RowOutcome::blank(row),
            })
            .collect();

        tracing::info!(
            ?platform,
            total = outcomes.len(),
            tracked = outcomes.iter().filter(|o| o.is_success()).count(),
            "Tracking rows processed"
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clients::{MockProviderClient, ProviderError};
    use crate::domain::entities::{HistoryEvent, Tracking, parse_rows};
    use crate::infrastructure::providers::dreamship::DREAMSHIP_STEPS;
    use crate::infrastructure::providers::merchize::MERCHIZE_TRACKING_STEPS;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn package(id: &str, name: &str, number: &str) -> ProviderRecord {
        ProviderRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            fulfillment_id: Some(id.to_string()),
            tracking: Some(Tracking {
                carrier: Some("USPS".to_string()),
                number: number.to_string(),
                url: None,
            }),
            ..ProviderRecord::new(Provider::Merchize)
        }
    }

    fn dreamship_order(id: &str) -> ProviderRecord {
        ProviderRecord {
            id: Some(id.to_string()),
            code: Some(id.to_string()),
            fulfillment_id: Some("77".to_string()),
            ..ProviderRecord::new(Provider::Dreamship)
        }
    }

    fn event(day: u32, message: &str) -> HistoryEvent {
        HistoryEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            location: Some("Memphis, TN".to_string()),
            status_message: Some(message.to_string()),
        }
    }

    fn merchize_mock() -> MockProviderClient {
        let mut client = MockProviderClient::new();
        client.expect_provider().return_const(Provider::Merchize);
        client.expect_match_steps().return_const(MERCHIZE_TRACKING_STEPS);
        client
    }

    fn dreamship_mock() -> MockProviderClient {
        let mut client = MockProviderClient::new();
        client.expect_provider().return_const(Provider::Dreamship);
        client.expect_match_steps().return_const(DREAMSHIP_STEPS);
        client
    }

    fn service(merchize: MockProviderClient, dreamship: MockProviderClient) -> TrackingService {
        TrackingService::new(ProviderSet::new(Arc::new(merchize), Arc::new(dreamship)))
    }

    #[tokio::test]
    async fn test_auto_platform_routes_and_keeps_order() {
        let mut merchize = merchize_mock();
        merchize
            .expect_bulk_lookup_by_code()
            .withf(|inputs, purpose| {
                *purpose == LookupPurpose::Tracking
                    && inputs == [ProviderOrderInput::order_code("RK-32344-92365")]
            })
            .times(1)
            .returning(|_, _| Ok(vec![package("ff1", "RK-32344-92365-F1", "9400111")]));
        merchize
            .expect_fetch_latest_history_event()
            .withf(|code, ffid| code == "RK-32344-92365" && ffid == "ff1")
            .times(1)
            .returning(|_, _| Ok(HistoryLookup::Latest(event(5, "In transit"))));

        let mut dreamship = dreamship_mock();
        dreamship
            .expect_bulk_lookup_by_code()
            .withf(|inputs, _| inputs == [ProviderOrderInput::order_code("322265507")])
            .times(1)
            .returning(|_, _| Ok(vec![dreamship_order("322265507")]));
        dreamship
            .expect_fetch_latest_history_event()
            .times(1)
            .returning(|_, _| Ok(HistoryLookup::NoHistory));

        let rows = parse_rows("RK-32344-92365\n\nPW12345\n322265507\nhello world");
        let outcomes = service(merchize, dreamship)
            .track_rows(rows, Platform::Auto)
            .await;

        assert_eq!(outcomes.len(), 5);

        let merchize_row = outcomes[0].outcome.as_ref().unwrap();
        assert_eq!(merchize_row.tracking_number(), "9400111");
        assert_eq!(merchize_row.carrier(), Some("USPS"));
        assert_eq!(
            merchize_row.history,
            Some(HistoryLookup::Latest(event(5, "In transit")))
        );

        assert_eq!(outcomes[1].error().as_deref(), Some("no input"));
        assert_eq!(outcomes[2].error().as_deref(), Some("Printway is not supported"));

        let dreamship_row = outcomes[3].outcome.as_ref().unwrap();
        assert_eq!(dreamship_row.tracking_number(), "");
        assert_eq!(dreamship_row.history, Some(HistoryLookup::NoHistory));
        assert_eq!(outcomes[3].provider, Some(Provider::Dreamship));

        assert_eq!(outcomes[4].error().as_deref(), Some("could not detect provider"));
    }

    #[tokio::test]
    async fn test_fixed_platform_skips_classification() {
        let mut merchize = merchize_mock();
        merchize
            .expect_bulk_lookup_by_code()
            .withf(|inputs, _| inputs == [ProviderOrderInput::external_number("MYSHOP-0001")])
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let mut dreamship = dreamship_mock();
        dreamship.expect_bulk_lookup_by_code().never();

        let outcomes = service(merchize, dreamship)
            .track_rows(parse_rows("MYSHOP-0001"), Platform::Merchize)
            .await;

        assert_eq!(outcomes[0].error().as_deref(), Some("no corresponding order found"));
        assert_eq!(outcomes[0].provider, Some(Provider::Merchize));
    }

    #[tokio::test]
    async fn test_history_failure_keeps_row_successful() {
        let mut merchize = merchize_mock();
        merchize
            .expect_bulk_lookup_by_code()
            .returning(|_, _| Ok(vec![package("ff1", "RK-1-F1", "")]));
        merchize.expect_fetch_latest_history_event().returning(|_, _| {
            Err(ProviderError::Unavailable {
                provider: Provider::Merchize,
                status: 500,
                body: "oops".to_string(),
            })
        });

        let pass = service(merchize, dreamship_mock())
            .track(Provider::Merchize, &[ProviderOrderInput::order_code("RK-1")])
            .await;

        assert!(pass.is_success());
        let tracked = pass.rows[0].as_ref().unwrap();
        assert_eq!(tracked.history, None);
        assert_eq!(
            tracked.history_error.as_deref(),
            Some("Merchize API error: 500 oops")
        );
    }

    #[tokio::test]
    async fn test_history_skipped_without_fulfillment() {
        let mut merchize = merchize_mock();
        merchize.expect_bulk_lookup_by_code().returning(|_, _| {
            Ok(vec![ProviderRecord {
                name: Some("RK-1-F1".to_string()),
                ..ProviderRecord::new(Provider::Merchize)
            }])
        });
        merchize.expect_fetch_latest_history_event().never();

        let pass = service(merchize, dreamship_mock())
            .track(Provider::Merchize, &[ProviderOrderInput::order_code("RK-1")])
            .await;

        let tracked = pass.rows[0].as_ref().unwrap();
        assert_eq!(tracked.history, Some(HistoryLookup::NoHistory));
    }

    #[tokio::test]
    async fn test_batch_failure_does_not_affect_other_provider() {
        let mut merchize = merchize_mock();
        merchize.expect_bulk_lookup_by_code().returning(|_, _| {
            Err(ProviderError::Rejected {
                provider: Provider::Merchize,
                message: "Invalid token".to_string(),
            })
        });

        let mut dreamship = dreamship_mock();
        dreamship
            .expect_bulk_lookup_by_code()
            .returning(|_, _| Ok(vec![dreamship_order("42")]));
        dreamship
            .expect_fetch_latest_history_event()
            .returning(|_, _| Ok(HistoryLookup::NoHistory));

        let outcomes = service(merchize, dreamship)
            .track_rows(parse_rows("RK-1\n42\nRK-2"), Platform::Auto)
            .await;

        assert_eq!(outcomes[0].error().as_deref(), Some("Invalid token"));
        assert!(outcomes[1].is_success());
        assert_eq!(outcomes[2].error().as_deref(), Some("Invalid token"));
    }

    #[test]
    fn test_tracking_input_kinds() {
        assert_eq!(
            tracking_input(Provider::Merchize, "RK-1"),
            ProviderOrderInput::order_code("RK-1")
        );
        assert_eq!(
            tracking_input(Provider::Merchize, "MYSHOP-1"),
            ProviderOrderInput::external_number("MYSHOP-1")
        );
        assert_eq!(
            tracking_input(Provider::Dreamship, "322265507"),
            ProviderOrderInput::order_code("322265507")
        );
        assert_eq!(
            tracking_input(Provider::Dreamship, "114-2545030-4324234"),
            ProviderOrderInput::reference_id("114-2545030-4324234")
        );
    }
}
