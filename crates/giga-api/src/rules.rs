// Automation rule listing

use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::Rule;

impl ElementsClient {
    /// List configured automation rules.
    ///
    /// `GET /api/v2/me/rules`
    pub async fn list_rules(&self) -> Result<Vec<Rule>, Error> {
        let url = self.api_url("api/v2/me/rules")?;
        debug!("listing rules");
        self.get_json(url).await
    }
}
