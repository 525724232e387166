// Event monitor cursor
//
// The monitor is a moving lower timestamp bound over the events
// endpoint. Each poll fetches everything at or after the cursor and
// hands it back oldest-first; the driver advances the cursor per
// delivered event so an interrupt mid-batch only re-fetches the
// unprocessed tail.
//
// Cursor policy on same-millisecond ties: advance is `max(cursor,
// ts + 1)`, so the cursor never decreases. Two events sharing a
// millisecond can still cause the earlier sibling to be re-delivered by
// the next poll if the server orders the tie differently; accepted as
// the cost of per-event granularity.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use giga_api::{ElementsClient, Event, EventsQuery};

use crate::error::CoreError;

/// Pause between monitor iterations.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum spacing of bridge-mode health/mode re-checks.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Moving-cursor poller over the events endpoint.
#[derive(Debug)]
pub struct Monitor {
    cursor: i64,
    group: Option<String>,
}

impl Monitor {
    /// Monitor starting at an explicit cursor (ms epoch).
    pub fn new(from_ts: i64, group: Option<String>) -> Self {
        Self { cursor: from_ts, group }
    }

    /// Monitor starting at the current wall-clock time, so historical
    /// events are not replayed.
    pub fn starting_now(group: Option<String>) -> Self {
        Self::new(Utc::now().timestamp_millis(), group)
    }

    /// The current lower bound for the next poll (ms epoch).
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Fetch events at or after the cursor, oldest-first.
    ///
    /// Does not advance the cursor; call [`advance`](Self::advance) per
    /// event once it has been printed/forwarded.
    pub async fn poll_once(&self, client: &ElementsClient) -> Result<Vec<Event>, CoreError> {
        let page = client
            .list_events(&EventsQuery {
                from_ts: Some(self.cursor),
                group: self.group.clone(),
                ..Default::default()
            })
            .await?;
        debug!(cursor = self.cursor, fetched = page.events.len(), "poll");
        Ok(into_chronological(page.events))
    }

    /// Advance the cursor past a delivered event. Monotonic: a tie or
    /// out-of-order delivery never moves the cursor backwards.
    pub fn advance(&mut self, event: &Event) {
        self.cursor = self.cursor.max(event.ts + 1);
    }
}

/// Reverse a newest-first server batch into chronological order.
fn into_chronological(mut events: Vec<Event>) -> Vec<Event> {
    events.reverse();
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, ts: i64) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "ts": ts.to_string(),
            "type": "open"
        }))
        .expect("event fixture")
    }

    #[test]
    fn batches_are_delivered_oldest_first() {
        let newest_first = vec![event("e3", 300), event("e2", 200), event("e1", 100)];
        let ordered = into_chronological(newest_first);
        let ts: Vec<i64> = ordered.iter().map(|e| e.ts).collect();
        assert_eq!(ts, vec![100, 200, 300]);
    }

    #[test]
    fn cursor_is_last_processed_ts_plus_one() {
        let mut monitor = Monitor::new(0, None);
        for ev in [event("e1", 100), event("e2", 200), event("e3", 300)] {
            monitor.advance(&ev);
        }
        assert_eq!(monitor.cursor(), 301);
    }

    #[test]
    fn cursor_never_decreases_on_ties() {
        let mut monitor = Monitor::new(0, None);
        monitor.advance(&event("e1", 500));
        assert_eq!(monitor.cursor(), 501);

        // Same-millisecond sibling delivered late.
        monitor.advance(&event("e2", 500));
        assert_eq!(monitor.cursor(), 501);

        // An older event can never pull the cursor backwards.
        monitor.advance(&event("e0", 100));
        assert_eq!(monitor.cursor(), 501);
    }

    #[tokio::test]
    async fn poll_applies_cursor_and_group() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let base = url::Url::parse(&server.uri()).expect("uri");
        let client =
            giga_api::ElementsClient::with_bases(reqwest::Client::new(), base.clone(), base);

        Mock::given(method("GET"))
            .and(path("/api/v2/me/events"))
            .and(query_param("from_ts", "12345"))
            .and(query_param("group", "door"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    { "id": "e2", "ts": "12400", "type": "close" },
                    { "id": "e1", "ts": "12350", "type": "open" }
                ]
            })))
            .mount(&server)
            .await;

        let mut monitor = Monitor::new(12_345, Some("door".into()));
        let events = monitor.poll_once(&client).await.expect("poll");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "e1");

        for ev in &events {
            monitor.advance(ev);
        }
        assert_eq!(monitor.cursor(), 12_401);
    }
}
