// Session lifecycle
//
// One `Session` value owns the authenticated client and the freshness
// timestamp; it is created at program start, passed explicitly to every
// handler, and never persisted. Re-authentication is a plain age check
// at the top of long-running loops, not a 401-triggered retry.

use std::time::{Duration, Instant};

use secrecy::SecretString;
use tracing::{debug, info};

use giga_api::{ElementsClient, TlsMode, Transport};

use crate::error::CoreError;

/// Session age after which a long-running loop re-authenticates.
pub const AUTH_EXPIRE: Duration = Duration::from_secs(6 * 60 * 60);

/// Everything needed to (re-)authenticate.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub username: String,
    pub password: SecretString,
    pub timeout: Duration,
    pub insecure: bool,
}

/// First-login identity information, printed once. Re-authentication
/// does not repeat it.
#[derive(Debug, Clone)]
pub struct Greeting {
    /// The vendor's welcome message from the identity host.
    pub message: String,
    /// Opaque session token from the OpenID begin call.
    pub token: String,
}

/// An authenticated connection to the Elements cloud.
pub struct Session {
    client: ElementsClient,
    config: SessionConfig,
    auth_time: Instant,
}

impl Session {
    /// Log in and activate the session.
    pub async fn connect(config: SessionConfig) -> Result<(Self, Greeting), CoreError> {
        let transport = Transport {
            tls: if config.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: config.timeout,
        };
        let client = ElementsClient::new(&transport)?;
        Self::with_client(client, config).await
    }

    /// Log in using a pre-built client (tests point it at a mock server).
    pub async fn with_client(
        client: ElementsClient,
        config: SessionConfig,
    ) -> Result<(Self, Greeting), CoreError> {
        let reply = client.login(&config.username, &config.password).await?;
        let token = client.begin_session().await?;
        info!("authenticated as {}", config.username);

        let greeting = Greeting {
            message: reply.message.unwrap_or_default(),
            token,
        };
        let session = Self {
            client,
            config,
            auth_time: Instant::now(),
        };
        Ok((session, greeting))
    }

    /// The authenticated API client.
    pub fn client(&self) -> &ElementsClient {
        &self.client
    }

    /// Time since the last successful authentication.
    pub fn age(&self) -> Duration {
        self.auth_time.elapsed()
    }

    /// Re-authenticate if the session has outlived [`AUTH_EXPIRE`].
    ///
    /// Returns `true` when a refresh happened. Silent on success -- the
    /// greeting is a first-login affair.
    pub async fn ensure_fresh(&mut self) -> Result<bool, CoreError> {
        if !needs_refresh(self.age()) {
            return Ok(false);
        }
        debug!("session expired after {:?}, re-authenticating", self.age());
        self.client
            .login(&self.config.username, &self.config.password)
            .await?;
        self.client.begin_session().await?;
        self.auth_time = Instant::now();
        info!("session refreshed");
        Ok(true)
    }
}

/// Age check behind [`Session::ensure_fresh`], split out for tests.
pub(crate) fn needs_refresh(age: Duration) -> bool {
    age >= AUTH_EXPIRE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_only_after_expiry() {
        assert!(!needs_refresh(Duration::ZERO));
        assert!(!needs_refresh(AUTH_EXPIRE - Duration::from_secs(1)));
        assert!(needs_refresh(AUTH_EXPIRE));
        assert!(needs_refresh(AUTH_EXPIRE + Duration::from_secs(1)));
    }
}
