// Home-automation bridge adapter
//
// Forwards selected events and state changes to a Domoticz-style server
// as plain GETs against its JSON endpoint. Three buckets: binary on/off
// actuator events, multi-button presses (selector levels), and
// mode/health alerts with a fixed severity table. The idx mapping is
// user-supplied and read-only; a missing key is a configuration error,
// not a silent skip.

use std::collections::HashMap;

use tracing::{debug, warn};
use url::Url;

use giga_api::Event;

use crate::error::CoreError;

/// Bridge target and device-id-to-idx mapping, loaded once at startup.
/// Map keys are lower-cased device/basestation identifiers.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: Url,
    pub ids: HashMap<String, u32>,
}

/// What a given event translates to on the bridge side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeAction {
    SwitchOn,
    SwitchOff,
    /// Selector level for multi-button devices.
    Level(u32),
    /// Not a bridge-relevant event; print only.
    Ignore,
}

/// Classify an event type into its bridge bucket.
pub fn classify(event_type: &str) -> BridgeAction {
    match event_type {
        "open" | "on" | "sirenon" | "movement" | "motion" | "yes" => BridgeAction::SwitchOn,
        "close" | "off" | "sirenoff" | "no" => BridgeAction::SwitchOff,
        "button1" => BridgeAction::Level(10),
        "button2" => BridgeAction::Level(20),
        "button3" => BridgeAction::Level(30),
        "button4" => BridgeAction::Level(40),
        _ => BridgeAction::Ignore,
    }
}

/// Alert severity for mode and health values. Unknown values land on a
/// mid-severity yellow.
pub fn severity(value: &str) -> u32 {
    match value {
        "green" | "ok" | "home" => 1,
        "orange" | "warning" | "away" | "custom" | "night" => 3,
        "red" | "intrusion" | "alarm" => 4,
        _ => 2,
    }
}

/// Client for the home-automation server.
pub struct Bridge {
    http: reqwest::Client,
    config: BridgeConfig,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build bridge client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Look up the bridge idx for a device identifier.
    fn idx_for(&self, device: &str) -> Result<u32, CoreError> {
        self.config
            .ids
            .get(&device.to_lowercase())
            .copied()
            .ok_or_else(|| CoreError::BridgeIdMissing { device: device.to_lowercase() })
    }

    /// Forward an event. Returns `false` when the event's type is not a
    /// bridge-relevant category.
    pub async fn forward_event(&self, event: &Event) -> Result<bool, CoreError> {
        let event_type = event.event_type.as_deref().unwrap_or_default();
        let device = event
            .origin
            .as_ref()
            .and_then(|o| o.id.as_deref())
            .unwrap_or_default();

        let mut url = self.command_url()?;
        match classify(event_type) {
            BridgeAction::SwitchOn => {
                let idx = self.idx_for(device)?;
                url.query_pairs_mut()
                    .append_pair("param", "switchlight")
                    .append_pair("idx", &idx.to_string())
                    .append_pair("switchcmd", "On");
            }
            BridgeAction::SwitchOff => {
                let idx = self.idx_for(device)?;
                url.query_pairs_mut()
                    .append_pair("param", "switchlight")
                    .append_pair("idx", &idx.to_string())
                    .append_pair("switchcmd", "Off");
            }
            BridgeAction::Level(level) => {
                let idx = self.idx_for(device)?;
                url.query_pairs_mut()
                    .append_pair("param", "switchlight")
                    .append_pair("idx", &idx.to_string())
                    .append_pair("switchcmd", "Set Level")
                    .append_pair("level", &level.to_string());
            }
            BridgeAction::Ignore => return Ok(false),
        }

        debug!(event_type, device, "forwarding event to bridge");
        self.send(url).await?;
        Ok(true)
    }

    /// Push a mode or health change as an alert-device update.
    ///
    /// `device` is the basestation/system identifier keyed in the idx
    /// map; `value` is the semantic state ("intrusion", "ok", "away").
    pub async fn push_alert(&self, device: &str, value: &str) -> Result<(), CoreError> {
        let idx = self.idx_for(device)?;
        let mut url = self.command_url()?;
        url.query_pairs_mut()
            .append_pair("param", "udevice")
            .append_pair("idx", &idx.to_string())
            .append_pair("nvalue", &severity(value).to_string())
            .append_pair("svalue", value);

        debug!(device, value, "pushing alert to bridge");
        self.send(url).await
    }

    /// One best-effort notification on monitor shutdown; never fails.
    pub async fn halt_ping(&self, device: &str) {
        let Ok(idx) = self.idx_for(device) else {
            return;
        };
        let Ok(mut url) = self.command_url() else {
            return;
        };
        url.query_pairs_mut()
            .append_pair("param", "udevice")
            .append_pair("idx", &idx.to_string())
            .append_pair("nvalue", "0")
            .append_pair("svalue", "monitor halted");

        if let Err(e) = self.send(url).await {
            warn!("bridge halt notification failed: {e}");
        }
    }

    fn command_url(&self) -> Result<Url, CoreError> {
        let mut url = self
            .config
            .base_url
            .join("json.htm")
            .map_err(|e| CoreError::Internal(format!("invalid bridge URL: {e}")))?;
        url.query_pairs_mut().append_pair("type", "command");
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<(), CoreError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::ConnectionFailed { reason: e.to_string() })?;
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                message: format!("bridge returned HTTP {}", resp.status()),
                status: Some(resp.status().as_u16()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server_uri: &str, ids: &[(&str, u32)]) -> BridgeConfig {
        BridgeConfig {
            base_url: Url::parse(server_uri).expect("uri"),
            ids: ids.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        }
    }

    fn door_event(event_type: &str, device: &str) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": "e1",
            "ts": "1000",
            "type": event_type,
            "o": { "id": device, "type": "ds02", "friendly_name": "Front Door" }
        }))
        .expect("event fixture")
    }

    #[test]
    fn classification_buckets() {
        assert_eq!(classify("open"), BridgeAction::SwitchOn);
        assert_eq!(classify("sirenoff"), BridgeAction::SwitchOff);
        assert_eq!(classify("button3"), BridgeAction::Level(30));
        assert_eq!(classify("homecoming"), BridgeAction::Ignore);
    }

    #[test]
    fn severity_table_with_mid_default() {
        assert_eq!(severity("ok"), 1);
        assert_eq!(severity("green"), 1);
        assert_eq!(severity("away"), 3);
        assert_eq!(severity("intrusion"), 4);
        assert_eq!(severity("something-new"), 2);
    }

    #[tokio::test]
    async fn forward_open_event_switches_on() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json.htm"))
            .and(query_param("param", "switchlight"))
            .and(query_param("idx", "7"))
            .and(query_param("switchcmd", "On"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let bridge = Bridge::new(config(&server.uri(), &[("abc123", 7)])).expect("bridge");
        let forwarded = bridge
            .forward_event(&door_event("open", "ABC123"))
            .await
            .expect("forward");
        assert!(forwarded);
    }

    #[tokio::test]
    async fn missing_idx_mapping_is_fatal() {
        let server = MockServer::start().await;
        let bridge = Bridge::new(config(&server.uri(), &[])).expect("bridge");

        let err = bridge
            .forward_event(&door_event("open", "unmapped"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, CoreError::BridgeIdMissing { ref device } if device == "unmapped"));
    }

    #[tokio::test]
    async fn alert_push_uses_severity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json.htm"))
            .and(query_param("param", "udevice"))
            .and(query_param("nvalue", "4"))
            .and(query_param("svalue", "intrusion"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let bridge = Bridge::new(config(&server.uri(), &[("f1a2b3", 9)])).expect("bridge");
        bridge.push_alert("F1A2B3", "intrusion").await.expect("alert");
    }

    #[tokio::test]
    async fn ignored_categories_are_not_forwarded() {
        let server = MockServer::start().await;
        let bridge = Bridge::new(config(&server.uri(), &[("abc123", 7)])).expect("bridge");

        let forwarded = bridge
            .forward_event(&door_event("homecoming", "abc123"))
            .await
            .expect("forward");
        assert!(!forwarded);
    }
}
