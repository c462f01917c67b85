//! Core entities for the Verification Flow

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of steps in the handshake sequence.
pub const STEP_COUNT: usize = 4;

/// Log line appended once every step is verified.
pub const CLEARANCE_GRANTED: &str = "SECURITY CLEARANCE GRANTED.";
/// Log line appended right before navigation.
pub const REDIRECTING: &str = "Redirecting to Secure Lobby...";

/// One scripted step of the handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-based ordinal, also the indicator slot it drives
    pub index: u8,
    pub name: &'static str,
    pub pending_message: &'static str,
    pub success_message: &'static str,
}

/// The fixed handshake sequence, in execution order.
pub const HANDSHAKE_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        index: 1,
        name: "hardware identity",
        pending_message: "Verifying Hardware ID...",
        success_message: "Device Signature Verified.",
    },
    StepDefinition {
        index: 2,
        name: "encrypted tunnel",
        pending_message: "Establishing Encrypted Tunnel...",
        success_message: "Tunnel Secure (AES-256).",
    },
    StepDefinition {
        index: 3,
        name: "backend handshake",
        pending_message: "Handshaking with HQ Server...",
        success_message: "Session Authorized.",
    },
    StepDefinition {
        index: 4,
        name: "anomaly scan",
        pending_message: "Running Anomaly Scan...",
        success_message: "No Threats Detected.",
    },
];

/// Visual state of a step indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    #[default]
    Idle,
    Active,
    Verified,
    Failed,
}

impl StepState {
    /// Status text shown under the indicator.
    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Active => Some("Verifying..."),
            Self::Verified => Some("Parsed"),
            Self::Failed => Some("Failed"),
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Verified => "verified",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a step's (simulated) work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Verified,
    Failed(String),
}

/// Where the flow is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FlowPhase {
    #[default]
    Idle,
    Running {
        step: u8,
    },
    Completed,
    Redirected {
        destination: String,
    },
    Aborted {
        step: u8,
        reason: String,
    },
}

impl FlowPhase {
    /// Phases after which the page is gone and no new run may start.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

/// What a call to `start()` ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// All steps verified and navigation performed.
    Redirected { run_id: Uuid, destination: String },
    /// A step failed; the trigger was re-enabled.
    Aborted { run_id: Uuid, step: u8, reason: String },
    /// All steps verified but the navigator refused.
    NavigationFailed { run_id: Uuid, reason: String },
    /// A run was already in progress (or the page already left).
    Ignored,
}

impl FlowOutcome {
    /// Metric label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Redirected { .. } => "redirected",
            Self::Aborted { .. } => "aborted",
            Self::NavigationFailed { .. } => "navigation_failed",
            Self::Ignored => "ignored",
        }
    }
}

/// Per-step states owned by one flow instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepTracker {
    states: [StepState; STEP_COUNT],
}

impl StepTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, index: u8) -> Option<StepState> {
        slot(index).map(|i| self.states[i])
    }

    pub fn states(&self) -> [StepState; STEP_COUNT] {
        self.states
    }

    /// Move a step to `next`, enforcing the step state machine and
    /// sequential execution.
    pub fn transition(&mut self, index: u8, next: StepState) -> Result<(), super::FlowError> {
        let i = slot(index).ok_or(super::FlowError::UnknownStep(index))?;
        let current = self.states[i];
        if !super::invariants::is_valid_step_transition(current, next) {
            return Err(super::FlowError::InvalidTransition {
                step: index,
                from: current,
                to: next,
            });
        }

        let mut candidate = self.states;
        candidate[i] = next;
        if !super::invariants::at_most_one_active(&candidate) {
            return Err(super::FlowError::StepAlreadyActive { step: index });
        }

        self.states = candidate;
        Ok(())
    }
}

fn slot(index: u8) -> Option<usize> {
    let i = usize::from(index).checked_sub(1)?;
    (i < STEP_COUNT).then_some(i)
}
