//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{FlowOutcome, FlowPhase, StepState, STEP_COUNT};
use async_trait::async_trait;

/// Primary Verification Flow API
#[async_trait]
pub trait VerificationFlowApi: Send + Sync {
    /// Run the handshake sequence to completion.
    ///
    /// A call made while another run is in progress returns
    /// [`FlowOutcome::Ignored`] without touching any state.
    async fn start(&self) -> FlowOutcome;

    /// Current phase of the flow.
    fn phase(&self) -> FlowPhase;

    /// Whether a run currently holds the in-progress guard.
    fn is_in_progress(&self) -> bool;

    /// States of all step indicators, in step order.
    fn step_states(&self) -> [StepState; STEP_COUNT];
}
