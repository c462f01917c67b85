//! Configuration for the Verification Flow

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page reached once clearance is granted.
pub const SECURE_ROOM_PAGE: &str = "secure-room.html";

/// Flow timing and labels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Pause between the trigger press and the first step
    pub warmup_ms: u64,
    /// Fixed part of each step's simulated work
    pub step_base_delay_ms: u64,
    /// Upper bound of the random part of each step's simulated work
    pub step_jitter_ms: u64,
    /// Pause after each verified step
    pub inter_step_pause_ms: u64,
    /// Pause between the clearance lines and navigation
    pub redirect_delay_ms: u64,
    /// Navigation target after clearance
    pub destination: String,
    /// Trigger label while idle
    pub idle_label: String,
    /// Trigger label while a run is in progress
    pub running_label: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            warmup_ms: 1000,
            step_base_delay_ms: 1500,
            step_jitter_ms: 1000,
            inter_step_pause_ms: 500,
            redirect_delay_ms: 1500,
            destination: SECURE_ROOM_PAGE.to_string(),
            idle_label: "Initiate Secure Link".to_string(),
            running_label: "Initializing...".to_string(),
        }
    }
}

impl FlowConfig {
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    pub fn inter_step_pause(&self) -> Duration {
        Duration::from_millis(self.inter_step_pause_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}
