use crate::dashboard::Dashboard;
use async_trait::async_trait;
use sn_01_verification_flow::{NavigationError, Navigator};
use tracing::info;

/// Records the destination page on the dashboard.
pub struct DashboardNavigator {
    dashboard: Dashboard,
}

impl DashboardNavigator {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

#[async_trait]
impl Navigator for DashboardNavigator {
    async fn navigate(&self, destination: &str) -> Result<(), NavigationError> {
        if destination.trim().is_empty() {
            return Err(NavigationError::Rejected("empty destination".to_string()));
        }
        info!(destination, "Navigating");
        self.dashboard.set_location(destination);
        Ok(())
    }
}
