// Transport configuration for building reqwest::Client instances.
//
// The Elements session lives in a cookie, so every client gets a cookie
// jar. TLS bypass exists for corporate proxies that re-sign the vendor
// certificate.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Accept any certificate.
    DangerAcceptInvalid,
}

/// Transport settings shared by every request the client sends.
#[derive(Debug, Clone)]
pub struct Transport {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(90),
        }
    }
}

impl Transport {
    /// Build a cookie-holding `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .cookie_provider(Arc::new(Jar::default()))
            .user_agent(concat!("gigactl/", env!("CARGO_PKG_VERSION")));

        if let TlsMode::DangerAcceptInvalid = self.tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
