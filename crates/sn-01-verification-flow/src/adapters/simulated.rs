//! Simulated Step Verifier
//!
//! Stands in for real device attestation: waits `base + jitter` on the
//! injected clock and always reports success.

use crate::config::FlowConfig;
use crate::domain::entities::{StepDefinition, StepOutcome};
use crate::ports::outbound::StepVerifier;
use async_trait::async_trait;
use shared_types::{Clock, RandomSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct SimulatedStepVerifier {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    base: Duration,
    jitter: Duration,
}

impl SimulatedStepVerifier {
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>, config: &FlowConfig) -> Self {
        Self {
            clock,
            random,
            base: Duration::from_millis(config.step_base_delay_ms),
            jitter: Duration::from_millis(config.step_jitter_ms),
        }
    }

    /// Delay for the next step: base plus a uniform share of the jitter.
    pub fn next_delay(&self) -> Duration {
        self.base + self.jitter.mul_f64(self.random.next_f64())
    }
}

#[async_trait]
impl StepVerifier for SimulatedStepVerifier {
    async fn verify(&self, step: &StepDefinition) -> StepOutcome {
        let delay = self.next_delay();
        debug!(step = step.index, delay_ms = delay.as_millis() as u64, "Simulating step work");
        self.clock.sleep(delay).await;
        StepOutcome::Verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::HANDSHAKE_STEPS;
    use shared_types::{FixedRandom, SystemClock};
    use tokio::time::Instant;

    fn verifier(sample: f64) -> SimulatedStepVerifier {
        SimulatedStepVerifier::new(
            Arc::new(SystemClock::new()),
            Arc::new(FixedRandom::new(sample)),
            &FlowConfig::default(),
        )
    }

    #[test]
    fn test_delay_bounds() {
        assert_eq!(verifier(0.0).next_delay(), Duration::from_millis(1500));
        assert_eq!(verifier(0.5).next_delay(), Duration::from_millis(2000));
        assert!(verifier(1.0).next_delay() < Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_waits_then_succeeds() {
        let started = Instant::now();
        let outcome = verifier(0.25).verify(&HANDSHAKE_STEPS[0]).await;

        assert_eq!(outcome, StepOutcome::Verified);
        assert_eq!(started.elapsed(), Duration::from_millis(1750));
    }
}
