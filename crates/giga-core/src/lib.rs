//! Business logic for the gigactl CLI.
//!
//! Owns everything between the raw API client and the command handlers:
//! the authenticated [`Session`] and its refresh policy, the per-run
//! device [`Registry`], the event [`Monitor`] cursor, the home-automation
//! [`Bridge`] adapter, crontab scheduling, and Pushbullet notification.

mod bridge;
mod error;
mod monitor;
mod notify;
mod registry;
mod schedule;
mod session;

pub use bridge::{Bridge, BridgeAction, BridgeConfig};
pub use error::CoreError;
pub use monitor::{HEALTH_CHECK_INTERVAL, Monitor, POLL_INTERVAL};
pub use notify::Notifier;
pub use registry::{DeviceKind, DeviceRef, Registry};
pub use schedule::{CrontabEntry, Crontab, next_run, parse_hhmm};
pub use session::{Greeting, Session, SessionConfig, AUTH_EXPIRE};
