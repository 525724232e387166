// Camera endpoints
//
// Listing, live-view stream URIs, cloud recording control, snapshots,
// and the privacy toggle.

use serde_json::json;
use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::{Camera, Liveview};

impl ElementsClient {
    /// List registered cameras.
    ///
    /// `GET /api/v1/me/cameras`
    pub async fn list_cameras(&self) -> Result<Vec<Camera>, Error> {
        let url = self.api_url("api/v1/me/cameras")?;
        debug!("listing cameras");
        self.get_json(url).await
    }

    /// Request the live-view stream URIs for a camera.
    ///
    /// `GET /api/v1/me/cameras/{id}/liveview/start`
    pub async fn liveview(&self, camera_id: &str) -> Result<Liveview, Error> {
        let url = self.api_url(&format!("api/v1/me/cameras/{camera_id}/liveview/start"))?;
        debug!(camera_id, "starting liveview");
        self.get_json(url).await
    }

    /// Start or stop cloud recording. `cmd` is `"start"` or `"stop"`.
    ///
    /// `GET /api/v1/me/cameras/{id}/recording/status?cmd={cmd}`
    pub async fn recording_command(&self, camera_id: &str, cmd: &str) -> Result<(), Error> {
        let mut url = self.api_url(&format!("api/v1/me/cameras/{camera_id}/recording/status"))?;
        url.query_pairs_mut().append_pair("cmd", cmd);
        debug!(camera_id, cmd, "recording command");
        let _: serde_json::Value = self.get_json(url).await?;
        Ok(())
    }

    /// Fetch a fresh snapshot as raw image bytes.
    ///
    /// `GET /api/v1/me/cameras/{id}/snapshot?fresh=true`
    pub async fn snapshot(&self, camera_id: &str) -> Result<Vec<u8>, Error> {
        let mut url = self.api_url(&format!("api/v1/me/cameras/{camera_id}/snapshot"))?;
        url.query_pairs_mut().append_pair("fresh", "true");
        debug!(camera_id, "fetching snapshot");
        self.get_bytes(url).await
    }

    /// Toggle the camera's privacy mode.
    ///
    /// `POST /api/v1/me/cameras/{id}/settings`
    pub async fn set_privacy(&self, camera_id: &str, enabled: bool) -> Result<(), Error> {
        let url = self.api_url(&format!("api/v1/me/cameras/{camera_id}/settings"))?;
        debug!(camera_id, enabled, "setting privacy");
        let _: serde_json::Value = self
            .post_json(url, &json!({ "privacy": enabled }))
            .await?;
        Ok(())
    }
}
