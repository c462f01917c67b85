//! Verification Flow Service
//!
//! Main service implementing `VerificationFlowApi`.

use crate::config::FlowConfig;
use crate::domain::entities::{
    FlowOutcome, FlowPhase, StepDefinition, StepOutcome, StepState, StepTracker, CLEARANCE_GRANTED,
    HANDSHAKE_STEPS, REDIRECTING, STEP_COUNT,
};
use crate::domain::errors::FlowError;
use crate::ports::inbound::VerificationFlowApi;
use crate::ports::outbound::{FlowSurface, LogSink, Navigator, StepVerifier};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Clock, LogCategory, LogEntry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Verification Flow Service
///
/// Orchestrates one handshake run:
/// 1. Acquire the in-progress guard and disable the trigger
/// 2. For each step: active → pending log → work → verified → success log
/// 3. Grant clearance and navigate
///
/// A failing step aborts the run, marks the step failed and re-enables the
/// trigger. A later run resumes at the failed step; verified steps are kept.
pub struct VerificationFlowService {
    config: FlowConfig,
    surface: Arc<dyn FlowSurface>,
    log: Arc<dyn LogSink>,
    navigator: Arc<dyn Navigator>,
    verifier: Arc<dyn StepVerifier>,
    clock: Arc<dyn Clock>,
    in_progress: AtomicBool,
    phase: Mutex<FlowPhase>,
    steps: Mutex<StepTracker>,
}

impl VerificationFlowService {
    pub fn new(
        config: FlowConfig,
        surface: Arc<dyn FlowSurface>,
        log: Arc<dyn LogSink>,
        navigator: Arc<dyn Navigator>,
        verifier: Arc<dyn StepVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            surface,
            log,
            navigator,
            verifier,
            clock,
            in_progress: AtomicBool::new(false),
            phase: Mutex::new(FlowPhase::Idle),
            steps: Mutex::new(StepTracker::new()),
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    fn log_line(&self, category: LogCategory, message: &str) {
        self.log.append(LogEntry::new(self.clock.now(), category, message));
    }

    fn set_phase(&self, phase: FlowPhase) {
        *self.phase.lock() = phase;
    }

    /// Update the owned tracker first, then mirror onto the surface.
    fn move_step(&self, index: u8, next: StepState) -> Result<(), FlowError> {
        self.steps.lock().transition(index, next)?;
        self.surface.set_step_state(index, next);
        Ok(())
    }

    async fn run(&self, run_id: Uuid) -> FlowOutcome {
        self.surface.set_trigger(false, &self.config.running_label);
        info!("Verification flow started");

        self.clock.sleep(self.config.warmup()).await;

        for step in HANDSHAKE_STEPS.iter() {
            match self.run_step(step).await {
                Ok(StepOutcome::Verified) => {}
                Ok(StepOutcome::Failed(reason)) => return self.abort(run_id, step.index, reason),
                Err(e) => return self.abort(run_id, step.index, e.to_string()),
            }
        }

        self.set_phase(FlowPhase::Completed);
        self.log_line(LogCategory::Success, CLEARANCE_GRANTED);
        self.log_line(LogCategory::Warning, REDIRECTING);

        self.clock.sleep(self.config.redirect_delay()).await;

        let destination = self.config.destination.clone();
        match self.navigator.navigate(&destination).await {
            Ok(()) => {
                info!(destination = %destination, "Clearance granted, redirected");
                self.set_phase(FlowPhase::Redirected {
                    destination: destination.clone(),
                });
                self.in_progress.store(false, Ordering::Release);
                FlowOutcome::Redirected {
                    run_id,
                    destination,
                }
            }
            Err(e) => {
                warn!(destination = %destination, error = %e, "Navigation failed");
                self.log_line(LogCategory::Danger, &format!("Navigation failed: {e}"));
                self.surface.set_trigger(true, &self.config.idle_label);
                self.in_progress.store(false, Ordering::Release);
                FlowOutcome::NavigationFailed {
                    run_id,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run one step. Steps without an indicator, or already verified by an
    /// earlier run, are skipped without logging or delay.
    async fn run_step(&self, step: &StepDefinition) -> Result<StepOutcome, FlowError> {
        if !self.surface.has_step(step.index) {
            debug!(step = step.index, "No indicator for step, skipping");
            return Ok(StepOutcome::Verified);
        }
        if self.steps.lock().state(step.index) == Some(StepState::Verified) {
            debug!(step = step.index, "Step already verified, skipping");
            return Ok(StepOutcome::Verified);
        }

        self.set_phase(FlowPhase::Running { step: step.index });
        self.move_step(step.index, StepState::Active)?;
        self.log_line(LogCategory::Info, step.pending_message);

        let outcome = self.verifier.verify(step).await;
        if let StepOutcome::Failed(_) = outcome {
            return Ok(outcome);
        }

        self.move_step(step.index, StepState::Verified)?;
        self.log_line(LogCategory::Success, step.success_message);
        debug!(step = step.index, name = step.name, "Step verified");

        self.clock.sleep(self.config.inter_step_pause()).await;
        Ok(StepOutcome::Verified)
    }

    fn abort(&self, run_id: Uuid, step: u8, reason: String) -> FlowOutcome {
        warn!(step, reason = %reason, "Verification step failed, aborting");

        if let Err(e) = self.move_step(step, StepState::Failed) {
            warn!(error = %e, "Could not mark step failed");
        }
        self.log_line(LogCategory::Danger, &format!("Step {step} failed: {reason}"));
        self.surface.set_trigger(true, &self.config.idle_label);
        self.set_phase(FlowPhase::Aborted {
            step,
            reason: reason.clone(),
        });
        self.in_progress.store(false, Ordering::Release);

        FlowOutcome::Aborted {
            run_id,
            step,
            reason,
        }
    }
}

#[async_trait]
impl VerificationFlowApi for VerificationFlowService {
    async fn start(&self) -> FlowOutcome {
        if !self.surface.has_trigger() {
            debug!("Page has no trigger control, flow disabled");
            return FlowOutcome::Ignored;
        }
        if self.phase.lock().is_terminal() {
            debug!("Flow already redirected, ignoring trigger");
            return FlowOutcome::Ignored;
        }
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Flow already in progress, ignoring trigger");
            return FlowOutcome::Ignored;
        }

        let run_id = Uuid::new_v4();
        self.run(run_id)
            .instrument(info_span!("verification_flow", %run_id))
            .await
    }

    fn phase(&self) -> FlowPhase {
        self.phase.lock().clone()
    }

    fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    fn step_states(&self) -> [StepState; STEP_COUNT] {
        self.steps.lock().states()
    }
}
