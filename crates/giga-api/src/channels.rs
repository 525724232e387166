// Notification channel listing

use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::ChannelsReply;

impl ElementsClient {
    /// List registered push-notification channels, grouped by transport.
    ///
    /// `GET /api/v1/me/notifications/users/channels`
    pub async fn list_channels(&self) -> Result<ChannelsReply, Error> {
        let url = self.api_url("api/v1/me/notifications/users/channels")?;
        debug!("listing notification channels");
        self.get_json(url).await
    }
}
