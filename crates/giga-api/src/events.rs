// Event listing
//
// `v2/me/events` with limit, timestamp-range, and group filters. The
// server returns events newest-first; ordering for display is the
// caller's concern (see giga-core's monitor).

use tracing::debug;
use url::Url;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::EventsPage;

/// Query parameters for the events endpoint. Unset fields are omitted
/// from the request.
#[derive(Debug, Clone, Default)]
pub struct EventsQuery {
    pub limit: Option<u32>,
    /// Lower timestamp bound, inclusive (ms epoch).
    pub from_ts: Option<i64>,
    /// Upper timestamp bound (ms epoch).
    pub to_ts: Option<i64>,
    /// Event category filter (`door`, `motion`, `systemhealth`, ...).
    pub group: Option<String>,
}

impl EventsQuery {
    fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(from_ts) = self.from_ts {
            pairs.append_pair("from_ts", &from_ts.to_string());
        }
        if let Some(to_ts) = self.to_ts {
            pairs.append_pair("to_ts", &to_ts.to_string());
        }
        if let Some(ref group) = self.group {
            pairs.append_pair("group", group);
        }
    }
}

impl ElementsClient {
    /// List events matching `query`.
    ///
    /// `GET /api/v2/me/events`
    pub async fn list_events(&self, query: &EventsQuery) -> Result<EventsPage, Error> {
        let mut url = self.api_url("api/v2/me/events")?;
        query.apply(&mut url);
        debug!(?query, "listing events");
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_omits_unset_fields() {
        let mut url = Url::parse("https://api.example.com/api/v2/me/events").expect("url");
        EventsQuery { limit: Some(5), ..Default::default() }.apply(&mut url);
        assert_eq!(url.query(), Some("limit=5"));
    }

    #[test]
    fn query_appends_all_fields() {
        let mut url = Url::parse("https://api.example.com/api/v2/me/events").expect("url");
        EventsQuery {
            limit: Some(999),
            from_ts: Some(1_000),
            to_ts: Some(2_000),
            group: Some("door".into()),
        }
        .apply(&mut url);
        let q = url.query().expect("query");
        assert!(q.contains("limit=999"));
        assert!(q.contains("from_ts=1000"));
        assert!(q.contains("to_ts=2000"));
        assert!(q.contains("group=door"));
    }
}
