// Pushbullet notification push
//
// Best-effort by contract: an invalid or rejected token is a warning,
// never an abort. Callers fire this after state-changing commands.

use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::error::CoreError;

const PUSHBULLET_BASE: &str = "https://api.pushbullet.com/";

/// Pushbullet note sender.
pub struct Notifier {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl Notifier {
    pub fn new(token: impl Into<String>) -> Result<Self, CoreError> {
        let base_url = Url::parse(PUSHBULLET_BASE)
            .map_err(|e| CoreError::Internal(format!("pushbullet URL: {e}")))?;
        Self::with_base(token, base_url)
    }

    /// Notifier against an explicit base URL (tests use a mock server).
    pub fn with_base(token: impl Into<String>, base_url: Url) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build notifier client: {e}")))?;
        Ok(Self { http, base_url, token: token.into() })
    }

    /// Send a note. Returns `true` on success; all failures are logged
    /// as warnings and swallowed.
    pub async fn push_note(&self, title: &str, body: &str) -> bool {
        let Ok(url) = self.base_url.join("v2/pushes") else {
            return false;
        };

        let result = self
            .http
            .post(url)
            .header("Access-Token", &self.token)
            .json(&json!({ "type": "note", "title": title, "body": body }))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                debug!("pushbullet notification sent");
                true
            }
            Ok(resp) if resp.status() == reqwest::StatusCode::UNAUTHORIZED => {
                warn!("pushbullet notification not sent: token rejected");
                false
            }
            Ok(resp) => {
                warn!("pushbullet notification not sent: HTTP {}", resp.status());
                false
            }
            Err(e) => {
                warn!("pushbullet notification not sent: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn note_is_posted_with_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/pushes"))
            .and(header("Access-Token", "tok123"))
            .and(body_string_contains("\"type\":\"note\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("uri");
        let notifier = Notifier::with_base("tok123", base).expect("notifier");
        assert!(notifier.push_note("Gigaset Elements", "Status AWAY").await);
    }

    #[tokio::test]
    async fn rejected_token_is_swallowed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/pushes"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("uri");
        let notifier = Notifier::with_base("bad-token", base).expect("notifier");
        assert!(!notifier.push_note("title", "body").await);
    }
}
