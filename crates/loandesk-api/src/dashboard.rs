use crate::ApiClient;
use crate::error::Error;
use crate::types::DashboardStatsResponse;

impl ApiClient {
    /// Portfolio counters shown on the landing dashboard.
    pub async fn dashboard_stats(&self) -> Result<DashboardStatsResponse, Error> {
        self.get(&["dashboard-stats"]).await
    }
}
