//! Outbound Ports (Driven Ports / SPI)
//!
//! Everything the flow touches outside itself: the page surface (trigger
//! control and step indicators), the log panel, navigation, and the step
//! work itself.

use crate::domain::entities::{StepDefinition, StepOutcome, StepState};
use crate::domain::errors::NavigationError;
use async_trait::async_trait;
use shared_types::LogEntry;

/// Trigger control and step indicator slots.
pub trait FlowSurface: Send + Sync {
    /// Capability probe: does the page have a trigger control at all?
    fn has_trigger(&self) -> bool;

    /// Enable or disable the trigger and set its label.
    fn set_trigger(&self, enabled: bool, label: &str);

    /// Capability probe: does the page have an indicator for this step?
    fn has_step(&self, index: u8) -> bool;

    /// Render a step indicator state.
    fn set_step_state(&self, index: u8, state: StepState);
}

/// Append-only log panel.
///
/// Implementations without a panel drop entries silently.
pub trait LogSink: Send + Sync {
    fn append(&self, entry: LogEntry);
}

/// Full-page navigation.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, destination: &str) -> Result<(), NavigationError>;
}

/// Performs the work behind one step.
#[async_trait]
pub trait StepVerifier: Send + Sync {
    async fn verify(&self, step: &StepDefinition) -> StepOutcome;
}
