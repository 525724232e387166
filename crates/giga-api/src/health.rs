// System health endpoint

use tracing::debug;

use crate::client::ElementsClient;
use crate::error::Error;
use crate::models::HealthStatus;

impl ElementsClient {
    /// Fetch the overall system health.
    ///
    /// `GET /api/v2/me/health`
    pub async fn system_health(&self) -> Result<HealthStatus, Error> {
        let url = self.api_url("api/v2/me/health")?;
        debug!("fetching system health");
        self.get_json(url).await
    }

    /// Best-effort health ping used before monitor shutdown; failures
    /// are swallowed.
    pub async fn health_ping(&self) {
        if let Ok(url) = self.api_url("api/v2/me/health") {
            self.get_best_effort(url).await;
        }
    }
}
