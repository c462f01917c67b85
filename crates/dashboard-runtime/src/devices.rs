//! Admin device control.

use crate::dashboard::Dashboard;
use shared_types::DeviceStatus;
use tracing::info;

pub struct DeviceControl {
    dashboard: Dashboard,
}

impl DeviceControl {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }

    /// Flip a device between authorized and blocked.
    ///
    /// Returns `None` when the device is not in the registry.
    pub fn toggle(&self, device_id: &str) -> Option<DeviceStatus> {
        let next = self.dashboard.device(device_id)?.toggled();
        self.dashboard.set_device(device_id, next);
        info!(device = device_id, status = %next, "Device toggled");
        Some(next)
    }

    /// Button label for the current state.
    pub fn button_label(status: DeviceStatus) -> &'static str {
        match status {
            DeviceStatus::Authorized => "BLOCK DEVICE",
            DeviceStatus::Blocked => "UNBLOCK",
        }
    }

    pub fn status_line(&self, device_id: &str) -> Option<String> {
        self.dashboard
            .device(device_id)
            .map(|status| format!("{} is {}", device_id, status))
    }
}
