// Basestation endpoints
//
// Listing, mode switching, and end-node (siren/plug) commands. Mode
// switches go through the basestation's `intrusion_settings`.

use serde_json::json;
use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::Basestation;

impl ElementsClient {
    /// List basestations with their attached sensors.
    ///
    /// `GET /api/v1/me/basestations`
    pub async fn list_basestations(&self) -> Result<Vec<Basestation>, Error> {
        let url = self.api_url("api/v1/me/basestations")?;
        debug!("listing basestations");
        self.get_json(url).await
    }

    /// Switch the active security mode (`home`, `away`, `custom`, `night`).
    ///
    /// `POST /api/v1/me/basestations/{id}`
    pub async fn set_mode(&self, basestation_id: &str, mode: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("api/v1/me/basestations/{basestation_id}"))?;
        debug!(mode, "switching mode");
        let _: serde_json::Value = self
            .post_json(url, &json!({ "intrusion_settings": { "active_mode": mode } }))
            .await?;
        Ok(())
    }

    /// Arm a mode with an entry delay in seconds.
    ///
    /// `POST /api/v1/me/basestations/{id}`
    pub async fn set_delayed_mode(
        &self,
        basestation_id: &str,
        mode: &str,
        delay_secs: u32,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("api/v1/me/basestations/{basestation_id}"))?;
        debug!(mode, delay_secs, "switching mode with delay");
        let arm_delay_ms = u64::from(delay_secs) * 1000;
        let _: serde_json::Value = self
            .post_json(
                url,
                &json!({
                    "intrusion_settings": {
                        "active_mode": mode,
                        "arm_delay": arm_delay_ms,
                    }
                }),
            )
            .await?;
        Ok(())
    }

    /// Send an on/off command to an end node (smart plug, siren).
    ///
    /// `POST /api/v1/me/basestations/{id}/endnodes/{node}/cmd`
    pub async fn endnode_command(
        &self,
        basestation_id: &str,
        node_id: &str,
        name: &str,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!(
            "api/v1/me/basestations/{basestation_id}/endnodes/{node_id}/cmd"
        ))?;
        debug!(node_id, name, "sending end-node command");
        let _: serde_json::Value = self.post_json(url, &json!({ "name": name })).await?;
        Ok(())
    }
}
