//! # Page Capabilities
//!
//! Which widgets the current page carries. Components probe these instead
//! of assuming page structure; a missing widget turns the matching feature
//! into a silent no-op.

use serde::{Deserialize, Serialize};

/// Widgets present on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCapabilities {
    pub log_panel: bool,
    pub score_gauge: bool,
    pub status_indicator: bool,
    pub traffic_chart: bool,
    pub threat_alerts: bool,
    pub device_control: bool,
    pub trigger: bool,
    /// Number of step indicator slots (0..=4), addressed 1..=n.
    pub step_slots: u8,
}

impl PageCapabilities {
    /// The full dashboard page.
    pub fn dashboard() -> Self {
        Self {
            log_panel: true,
            score_gauge: true,
            status_indicator: true,
            traffic_chart: true,
            threat_alerts: true,
            device_control: true,
            trigger: true,
            step_slots: 4,
        }
    }

    /// A page with none of the dashboard widgets (e.g. the login page).
    pub fn bare() -> Self {
        Self {
            log_panel: false,
            score_gauge: false,
            status_indicator: false,
            traffic_chart: false,
            threat_alerts: false,
            device_control: false,
            trigger: false,
            step_slots: 0,
        }
    }

    pub fn has_step(&self, index: u8) -> bool {
        (1..=self.step_slots).contains(&index)
    }
}

impl Default for PageCapabilities {
    fn default() -> Self {
        Self::dashboard()
    }
}
