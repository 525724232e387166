// Elements cloud HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, status checking,
// and content-type-aware decoding. Endpoint modules (basestations,
// cameras, etc.) add inherent methods on top; this module stays focused
// on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::Transport;

const API_BASE: &str = "https://api.gigaset-elements.de/";
const IDENTITY_BASE: &str = "https://im.gigaset-elements.de/";

/// HTTP client for the Gigaset Elements cloud.
///
/// Holds the cookie jar that carries the session; one instance serves a
/// whole program run. Responses are decoded by declared content type:
/// JSON to typed values, images to raw bytes, everything else to text.
pub struct ElementsClient {
    http: reqwest::Client,
    api_base: Url,
    identity_base: Url,
}

impl ElementsClient {
    /// Create a client against the production cloud endpoints.
    pub fn new(transport: &Transport) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            api_base: Url::parse(API_BASE)?,
            identity_base: Url::parse(IDENTITY_BASE)?,
        })
    }

    /// Create a client with explicit base URLs (used by tests to point
    /// both surfaces at one mock server).
    pub fn with_bases(http: reqwest::Client, api_base: Url, identity_base: Url) -> Self {
        Self { http, api_base, identity_base }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve `path` against the resource API base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.api_base.join(path)?)
    }

    /// Resolve `path` against the identity host.
    pub(crate) fn identity_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.identity_base.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::decode_json(resp).await
    }

    /// GET a resource whose body is plain text (the OpenID begin reply).
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = Self::check_status(resp).await?;
        resp.text().await.map_err(Error::Transport)
    }

    /// GET a binary resource (camera snapshots).
    pub(crate) async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, Error> {
        debug!("GET {} (binary)", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.bytes().await.map_err(Error::Transport)?.to_vec())
    }

    /// Fire a GET and ignore every possible failure. For telemetry-style
    /// calls that must never affect the run.
    pub(crate) async fn get_best_effort(&self, url: Url) {
        debug!("GET {} (best effort)", url);
        match self.http.get(url).send().await {
            Ok(resp) if !resp.status().is_success() => {
                debug!("best-effort call returned {}", resp.status());
            }
            Ok(_) => {}
            Err(e) => debug!("best-effort call failed: {e}"),
        }
    }

    /// POST a JSON body, decode a JSON reply.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::decode_json(resp).await
    }

    /// POST a form-encoded body, decode a JSON reply. The identity login
    /// endpoint only accepts form encoding.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {} (form)", url);
        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::decode_json(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }

    async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
