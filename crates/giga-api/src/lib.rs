//! Async client for the Gigaset Elements cloud API.
//!
//! The API is plain HTTPS + JSON: an identity login that sets a session
//! cookie, an OpenID "begin" call that activates it, and a handful of
//! `me/...` resource endpoints. [`ElementsClient`] wraps a cookie-holding
//! `reqwest::Client`; endpoint groups are implemented as inherent methods
//! in one file each.

mod auth;
mod basestations;
mod cameras;
mod channels;
mod client;
mod error;
mod events;
mod health;
mod models;
mod rules;
mod transport;

pub use client::ElementsClient;
pub use error::Error;
pub use events::EventsQuery;
pub use models::{
    Basestation, Battery, Camera, CameraSettings, Channel, ChannelsReply, Event, EventOrigin,
    EventsPage, HealthStatus, IntrusionSettings, Liveview, LoginReply, MotionDetection, Rule,
    Sensor,
};
pub use transport::{TlsMode, Transport};
