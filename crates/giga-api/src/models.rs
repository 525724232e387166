// Elements API response types
//
// Typed records per endpoint, validated at the deserialization boundary.
// Fields use `#[serde(default)]` liberally because the cloud is
// inconsistent about field presence across basestation firmware versions;
// undocumented fields land in the flattened `extra` map.

use serde::{Deserialize, Deserializer, Serialize};

// ── Identity ─────────────────────────────────────────────────────────

/// Reply from the identity login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub status: Option<String>,
    /// Human greeting, printed once on first authentication.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Basestation & sensors ────────────────────────────────────────────

/// Basestation object from `v1/me/basestations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basestation {
    pub id: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub firmware_status: Option<String>,
    #[serde(default)]
    pub intrusion_settings: Option<IntrusionSettings>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Arming configuration nested inside a basestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrusionSettings {
    #[serde(default)]
    pub active_mode: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Sensor attached to a basestation. `type_code` is the vendor's short
/// device code (`ds02` door, `ps02` motion, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    #[serde(rename = "type")]
    pub type_code: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub firmware_status: Option<String>,
    #[serde(default)]
    pub battery: Option<Battery>,
    #[serde(default)]
    pub position_status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Camera ───────────────────────────────────────────────────────────

/// Camera object from `v1/me/cameras`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub firmware_status: Option<String>,
    #[serde(default)]
    pub settings: Option<CameraSettings>,
    #[serde(default)]
    pub motion_detection: Option<MotionDetection>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub nightmode: Option<String>,
    #[serde(default)]
    pub mic: Option<String>,
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionDetection {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Live-view start reply: a map of scheme name to stream URI.
#[derive(Debug, Clone, Deserialize)]
pub struct Liveview {
    #[serde(default)]
    pub uri: std::collections::BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Events ───────────────────────────────────────────────────────────

/// One page from `v2/me/events`. The server returns newest-first.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub home_state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Single event. Immutable once fetched; ordered by `ts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Milliseconds since epoch. The API serializes this as a decimal
    /// string; older firmware sent a bare number.
    #[serde(deserialize_with = "ts_millis")]
    pub ts: i64,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(rename = "o", default)]
    pub origin: Option<EventOrigin>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Originating device of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOrigin {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn ts_millis<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

// ── Health ───────────────────────────────────────────────────────────

/// Reply from `v2/me/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub system_health: Option<String>,
    #[serde(default)]
    pub status_msg_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    /// Status suffix for display: empty when the system is green,
    /// otherwise the status message id.
    pub fn status_suffix(&self) -> String {
        match self.system_health.as_deref() {
            Some("green") | None => String::new(),
            _ => format!(" | {}", self.status_msg_id.as_deref().unwrap_or("unknown")),
        }
    }
}

// ── Rules & notification channels ────────────────────────────────────

/// Automation rule from `v2/me/rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Notification channel registration (one mobile app install).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reply from the channels endpoint, grouped by push transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsReply {
    #[serde(default)]
    pub gcm: Vec<Channel>,
    #[serde(default)]
    pub apns: Vec<Channel>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChannelsReply {
    /// All channels regardless of transport.
    pub fn all(&self) -> impl Iterator<Item = &Channel> {
        self.gcm.iter().chain(self.apns.iter())
    }
}
