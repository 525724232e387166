// ── Core error types ──
//
// User-facing errors from giga-core. Consumers never see raw HTTP status
// codes or JSON parse failures; the `From<giga_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach the Elements cloud: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("No {kind} device registered with this account")]
    NoSuchSensor { kind: String },

    #[error("No bridge idx mapped for device '{device}'")]
    BridgeIdMissing { device: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Scheduling failed: {message}")]
    Schedule { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<giga_api::Error> for CoreError {
    fn from(err: giga_api::Error) -> Self {
        match err {
            giga_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            giga_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed { reason: e.to_string() }
                }
            }
            giga_api::Error::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            giga_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            giga_api::Error::Tls(msg) => CoreError::ConnectionFailed { reason: msg },
            giga_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected API payload: {message}"))
            }
        }
    }
}
