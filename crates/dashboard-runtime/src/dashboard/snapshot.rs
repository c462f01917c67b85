use serde::Serialize;
use shared_types::{
    ConnectionState, DeviceStatus, LogEntry, Score, StatusLevel, ThreatAlert, TrafficSample,
};
use sn_01_verification_flow::StepState;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: String,
}

/// Read-only copy of the dashboard, detached from the lock.
///
/// Absent widgets are `None` or empty.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub trigger: Option<TriggerView>,
    /// `(index, state)` for each present step indicator.
    pub steps: Vec<(u8, StepState)>,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub score: Option<Score>,
    pub status: StatusLevel,
    pub connection: ConnectionState,
    pub traffic: Vec<TrafficSample>,
    pub network_load: Option<u64>,
    pub alerts: Vec<ThreatAlert>,
    pub devices: BTreeMap<String, DeviceStatus>,
    pub location: Option<String>,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for DashboardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STATUS     {}", self.status.label())?;
        writeln!(f, "UPLINK     {}", self.connection.label())?;
        if let Some(score) = self.score {
            writeln!(f, "SCORE      {}%", score)?;
        }
        if let Some(load) = self.network_load {
            writeln!(f, "NET LOAD   {} pps", load)?;
        }
        for (device, status) in &self.devices {
            writeln!(f, "DEVICE     {} is {}", device, status)?;
        }
        for alert in &self.alerts {
            writeln!(f, "ALERT      {} | {} on {}", alert.headline(), alert.anomaly_code, alert.device_id)?;
        }
        if let Some(location) = &self.location {
            writeln!(f, "LOCATION   {}", location)?;
        }
        writeln!(f, "LOG")?;
        for entry in &self.log {
            writeln!(f, "  {:<8} {}", entry.category.as_str(), entry)?;
        }
        Ok(())
    }
}
