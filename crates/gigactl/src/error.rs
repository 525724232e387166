//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use giga_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Elements cloud")]
    #[diagnostic(
        code(gigactl::connection_failed),
        help("Check your network connection. {reason}")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(gigactl::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(gigactl::auth_failed),
        help("Verify the username and password for my.gigaset-elements.com.")
    )]
    AuthFailed { message: String },

    #[error("Username and/or password missing")]
    #[diagnostic(
        code(gigactl::no_credentials),
        help(
            "Pass -u/-p, set GIGA_USERNAME/GIGA_PASSWORD, or add an\n\
             [accounts] section to the configuration file."
        )
    )]
    NoCredentials,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file does not exist: {path}")]
    #[diagnostic(code(gigactl::no_config))]
    NoConfig { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gigactl::validation))]
    Validation { field: String, reason: String },

    #[error("Bridge is not configured")]
    #[diagnostic(
        code(gigactl::no_bridge),
        help("Add a [bridge] section with url and [bridge.ids] to the configuration file.")
    )]
    NoBridge,

    #[error(transparent)]
    #[diagnostic(code(gigactl::config))]
    Config(Box<figment::Error>),

    // ── Resources ────────────────────────────────────────────────────
    #[error("No {resource} registered with this account")]
    #[diagnostic(code(gigactl::not_found))]
    NotFound { resource: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(gigactl::api_error))]
    ApiError {
        message: String,
        /// HTTP status when the cloud answered at all; server-class
        /// statuses count as transient for the monitor's restart logic.
        status: Option<u16>,
    },

    // ── Scheduling ───────────────────────────────────────────────────
    #[error("Scheduling failed: {message}")]
    #[diagnostic(code(gigactl::schedule))]
    Schedule { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(gigactl::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NoConfig { .. }
            | Self::Validation { .. }
            | Self::NoBridge
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<giga_api::Error> for CliError {
    fn from(err: giga_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::NoSuchSensor { kind } => CliError::NotFound {
                resource: format!("{kind} device"),
            },
            CoreError::BridgeIdMissing { device } => CliError::Validation {
                field: "bridge.ids".into(),
                reason: format!("no idx mapped for device '{device}'"),
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Schedule { message } => CliError::Schedule { message },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Internal(message) => CliError::ApiError { message, status: None },
        }
    }
}
