//! Domain invariants for the Verification Flow

use super::entities::StepState;

/// INVARIANT-1: Steps pass through `active`
/// `verified` and `failed` are only reachable from `active`; a failed step
/// may be retried (back to `active`); `verified` never regresses.
pub fn is_valid_step_transition(from: StepState, to: StepState) -> bool {
    matches!(
        (from, to),
        (StepState::Idle, StepState::Active)
            | (StepState::Active, StepState::Verified)
            | (StepState::Active, StepState::Failed)
            | (StepState::Failed, StepState::Active)
    )
}

/// INVARIANT-2: Sequential execution
/// At most one step is `active` at any time.
pub fn at_most_one_active(states: &[StepState]) -> bool {
    states.iter().filter(|s| **s == StepState::Active).count() <= 1
}
