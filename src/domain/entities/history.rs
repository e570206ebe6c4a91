//! Shipment history events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::time_format::day_month;

/// Status message reported for a fulfillment that has no events yet.
pub const NO_HISTORY_MESSAGE: &str = "no shipment history yet";

/// One shipment-status event of a fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub status_message: Option<String>,
}

impl HistoryEvent {
    /// The event date in the sheet's `DD-MM` layout.
    pub fn day_month(&self) -> String {
        day_month(&self.timestamp)
    }
}

/// Outcome of a latest-history lookup.
///
/// `NoHistory` is a successful answer ("nothing scanned yet"), distinct from a
/// provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryLookup {
    Latest(HistoryEvent),
    NoHistory,
}

impl HistoryLookup {
    /// Picks the event with the greatest timestamp, regardless of list order.
    ///
    /// On equal timestamps the first one in list order wins.
    pub fn from_events(events: impl IntoIterator<Item = HistoryEvent>) -> Self {
        events
            .into_iter()
            .fold(None::<HistoryEvent>, |latest, event| match latest {
                Some(current) if current.timestamp >= event.timestamp => Some(current),
                _ => Some(event),
            })
            .map_or(Self::NoHistory, Self::Latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(day: u32, message: &str) -> HistoryEvent {
        HistoryEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            location: Some(format!("Hub {day}")),
            status_message: Some(message.to_string()),
        }
    }

    #[test]
    fn test_latest_is_max_timestamp_not_last() {
        let lookup = HistoryLookup::from_events(vec![
            event(1, "t1"),
            event(3, "t3"),
            event(2, "t2"),
        ]);

        let HistoryLookup::Latest(latest) = lookup else {
            panic!("expected an event");
        };
        assert_eq!(latest.status_message.as_deref(), Some("t3"));
        assert_eq!(latest.day_month(), "03-05");
    }

    #[test]
    fn test_no_events_is_placeholder() {
        assert_eq!(HistoryLookup::from_events(Vec::new()), HistoryLookup::NoHistory);
    }

    #[test]
    fn test_tie_keeps_first() {
        let lookup = HistoryLookup::from_events(vec![event(4, "first"), event(4, "second")]);
        assert!(matches!(
            lookup,
            HistoryLookup::Latest(e) if e.status_message.as_deref() == Some("first")
        ));
    }
}
