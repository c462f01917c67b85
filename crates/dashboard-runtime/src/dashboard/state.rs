use super::log_panel::LogPanel;
use super::snapshot::{DashboardSnapshot, TriggerView};
use parking_lot::Mutex;
use shared_types::{
    ConnectionState, DeviceStatus, LogEntry, PageCapabilities, Score, StatusLevel, ThreatAlert,
    TrafficSample,
};
use shield_telemetry::{DASHBOARD_SCORE, LOG_ENTRIES_EVICTED};
use sn_01_verification_flow::{FlowConfig, FlowSurface, LogSink, StepState, STEP_COUNT};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::trace;

/// Device shown in the admin device control.
pub const DEMO_DEVICE: &str = "DEMO_DEVICE_A";

/// Threat alert blocks kept on screen, newest first.
pub const ALERT_CAPACITY: usize = 20;

/// Everything a renderer would draw.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub capabilities: PageCapabilities,
    pub trigger_enabled: bool,
    pub trigger_label: String,
    pub steps: [StepState; STEP_COUNT],
    pub log: LogPanel,
    pub score: Option<Score>,
    pub status: StatusLevel,
    pub connection: ConnectionState,
    pub traffic: VecDeque<TrafficSample>,
    pub traffic_window: usize,
    pub alerts: VecDeque<ThreatAlert>,
    pub devices: BTreeMap<String, DeviceStatus>,
    pub location: Option<String>,
}

impl DashboardState {
    pub fn new(capabilities: PageCapabilities, idle_label: &str, traffic_window: usize) -> Self {
        let mut devices = BTreeMap::new();
        if capabilities.device_control {
            devices.insert(DEMO_DEVICE.to_string(), DeviceStatus::Authorized);
        }

        Self {
            capabilities,
            trigger_enabled: capabilities.trigger,
            trigger_label: idle_label.to_string(),
            steps: [StepState::Idle; STEP_COUNT],
            log: LogPanel::new(),
            score: None,
            status: StatusLevel::Secure,
            connection: ConnectionState::Offline,
            traffic: VecDeque::with_capacity(traffic_window),
            traffic_window,
            alerts: VecDeque::new(),
            devices,
            location: None,
        }
    }

    /// Network-load readout: floor of the latest traffic value.
    pub fn network_load(&self) -> Option<u64> {
        self.traffic
            .back()
            .map(|sample| sample.packets_per_second.max(0.0).floor() as u64)
    }
}

/// Shared handle on the dashboard state.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Mutex<DashboardState>>,
}

impl Dashboard {
    pub fn new(capabilities: PageCapabilities, flow: &FlowConfig, traffic_window: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DashboardState::new(
                capabilities,
                &flow.idle_label,
                traffic_window,
            ))),
        }
    }

    pub fn capabilities(&self) -> PageCapabilities {
        self.inner.lock().capabilities
    }

    /// Run a closure against the locked state.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn push_log(&self, entry: LogEntry) {
        let mut state = self.inner.lock();
        if !state.capabilities.log_panel {
            return;
        }
        trace!(category = %entry.category, message = %entry.message, "Log panel append");
        let dropped = state.log.push(entry);
        if dropped > 0 {
            LOG_ENTRIES_EVICTED.inc_by(dropped as f64);
        }
    }

    pub fn set_score(&self, score: Score) {
        let mut state = self.inner.lock();
        if state.capabilities.score_gauge {
            state.score = Some(score);
            DASHBOARD_SCORE.set(score.as_percent());
        }
    }

    pub fn set_status(&self, status: StatusLevel) {
        let mut state = self.inner.lock();
        if state.capabilities.status_indicator {
            state.status = status;
        }
    }

    pub fn set_connection(&self, connection: ConnectionState) {
        self.inner.lock().connection = connection;
    }

    pub fn push_traffic(&self, sample: TrafficSample) {
        let mut state = self.inner.lock();
        if !state.capabilities.traffic_chart {
            return;
        }
        state.traffic.push_back(sample);
        while state.traffic.len() > state.traffic_window {
            state.traffic.pop_front();
        }
    }

    /// Show the alert block. The matching log line is appended separately.
    pub fn push_alert(&self, alert: ThreatAlert) {
        let mut state = self.inner.lock();
        if !state.capabilities.threat_alerts {
            return;
        }
        state.alerts.push_front(alert);
        state.alerts.truncate(ALERT_CAPACITY);
    }

    /// Record a device status. Returns the previous status, if known.
    pub fn set_device(&self, device_id: &str, status: DeviceStatus) -> Option<DeviceStatus> {
        self.inner
            .lock()
            .devices
            .insert(device_id.to_string(), status)
    }

    pub fn device(&self, device_id: &str) -> Option<DeviceStatus> {
        self.inner.lock().devices.get(device_id).copied()
    }

    pub fn set_location(&self, page: &str) {
        self.inner.lock().location = Some(page.to_string());
    }

    pub fn location(&self) -> Option<String> {
        self.inner.lock().location.clone()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.inner.lock();
        DashboardSnapshot {
            trigger: state.capabilities.trigger.then(|| TriggerView {
                enabled: state.trigger_enabled,
                label: state.trigger_label.clone(),
            }),
            steps: state
                .steps
                .iter()
                .enumerate()
                .filter(|(i, _)| state.capabilities.has_step(*i as u8 + 1))
                .map(|(i, step)| (i as u8 + 1, *step))
                .collect(),
            log: state.log.entries().cloned().collect(),
            score: state.score,
            status: state.status,
            connection: state.connection,
            traffic: state.traffic.iter().cloned().collect(),
            network_load: state.network_load(),
            alerts: state.alerts.iter().cloned().collect(),
            devices: state.devices.clone(),
            location: state.location.clone(),
        }
    }
}

impl FlowSurface for Dashboard {
    fn has_trigger(&self) -> bool {
        self.inner.lock().capabilities.trigger
    }

    fn set_trigger(&self, enabled: bool, label: &str) {
        let mut state = self.inner.lock();
        if state.capabilities.trigger {
            state.trigger_enabled = enabled;
            state.trigger_label = label.to_string();
        }
    }

    fn has_step(&self, index: u8) -> bool {
        self.inner.lock().capabilities.has_step(index)
    }

    fn set_step_state(&self, index: u8, step: StepState) {
        let mut state = self.inner.lock();
        if !state.capabilities.has_step(index) {
            return;
        }
        if let Some(slot) = state.steps.get_mut(usize::from(index) - 1) {
            *slot = step;
        }
    }
}

impl LogSink for Dashboard {
    fn append(&self, entry: LogEntry) {
        self.push_log(entry);
    }
}
