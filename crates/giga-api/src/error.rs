use thiserror::Error;

/// Top-level error type for the `giga-api` crate.
///
/// Covers every failure mode the cloud API can produce: authentication,
/// transport, non-success status, and malformed payloads. `giga-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// Login rejected (wrong credentials, locked account, expired session).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status from the API.
    #[error("HTTP error {status}")]
    Status { status: u16, body: String },

    /// TLS setup or client construction failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
