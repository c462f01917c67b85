use async_trait::async_trait;
use shield_telemetry::FLOW_STEP_DURATION;
use sn_01_verification_flow::{StepDefinition, StepOutcome, StepVerifier};
use std::sync::Arc;
use tokio::time::Instant;

/// Observes how long each step's work takes.
pub struct MeteredVerifier {
    inner: Arc<dyn StepVerifier>,
}

impl MeteredVerifier {
    pub fn new(inner: Arc<dyn StepVerifier>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StepVerifier for MeteredVerifier {
    async fn verify(&self, step: &StepDefinition) -> StepOutcome {
        let started = Instant::now();
        let outcome = self.inner.verify(step).await;
        FLOW_STEP_DURATION.observe(started.elapsed().as_secs_f64());
        outcome
    }
}
