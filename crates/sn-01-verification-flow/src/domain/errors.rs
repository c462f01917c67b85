//! Error types for the Verification Flow

use super::entities::StepState;
use thiserror::Error;

/// Errors raised while sequencing the flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// Step state machine violation
    #[error("Invalid transition for step {step}: {from} -> {to}")]
    InvalidTransition {
        step: u8,
        from: StepState,
        to: StepState,
    },

    /// Another step is still `active`
    #[error("Cannot activate step {step}: another step is active")]
    StepAlreadyActive { step: u8 },

    /// Step ordinal outside 1..=4
    #[error("Unknown step: {0}")]
    UnknownStep(u8),
}

/// Navigation could not be performed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Navigation target rejected: {0}")]
    Rejected(String),
}
