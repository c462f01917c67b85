//! Fault-Injecting Verifier
//!
//! Wraps another verifier and fails one chosen step after the inner
//! verifier has done its work. Used to exercise the abort path.

use crate::domain::entities::{StepDefinition, StepOutcome};
use crate::ports::outbound::StepVerifier;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

pub struct FaultInjectingVerifier {
    inner: Arc<dyn StepVerifier>,
    failing_step: u8,
    reason: String,
    /// Fail only the first time the step runs, so a retry can pass.
    once: bool,
    fired: AtomicBool,
}

impl FaultInjectingVerifier {
    pub fn new(inner: Arc<dyn StepVerifier>, failing_step: u8, reason: impl Into<String>) -> Self {
        Self {
            inner,
            failing_step,
            reason: reason.into(),
            once: false,
            fired: AtomicBool::new(false),
        }
    }

    /// Fail only on the first attempt of the step.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

#[async_trait]
impl StepVerifier for FaultInjectingVerifier {
    async fn verify(&self, step: &StepDefinition) -> StepOutcome {
        let outcome = self.inner.verify(step).await;
        if step.index != self.failing_step {
            return outcome;
        }
        if self.once && self.fired.swap(true, Ordering::AcqRel) {
            return outcome;
        }
        warn!(step = step.index, reason = %self.reason, "Injecting step failure");
        StepOutcome::Failed(self.reason.clone())
    }
}
