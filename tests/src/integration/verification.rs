//! # Verification Flow Integration
//!
//! Drives the real `VerificationFlowService` through the runtime and checks
//! what lands on the dashboard.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    use dashboard_runtime::{DashboardConfig, DashboardRuntime};
    use shared_types::{
        Clock, FixedRandom, LogCategory, PageCapabilities, RandomSource, SystemClock,
    };
    use sn_01_verification_flow::{
        FaultInjectingVerifier, FlowOutcome, FlowPhase, SimulatedStepVerifier, StepState,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn runtime() -> DashboardRuntime {
        DashboardRuntime::with_sources(
            DashboardConfig::default(),
            Arc::new(SystemClock::new()),
            Arc::new(FixedRandom::new(0.0)),
        )
    }

    fn runtime_failing_once(step: u8) -> DashboardRuntime {
        let config = DashboardConfig::default();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomSource> = Arc::new(FixedRandom::new(0.0));
        let inner = Arc::new(SimulatedStepVerifier::new(clock.clone(), random.clone(), &config.flow));
        let verifier = FaultInjectingVerifier::new(inner, step, "Tunnel negotiation timed out").once();
        DashboardRuntime::with_verifier(config, clock, random, Arc::new(verifier))
    }

    fn chronological(rt: &DashboardRuntime) -> Vec<(LogCategory, String)> {
        rt.dashboard().with_state(|s| {
            s.log
                .chronological()
                .map(|e| (e.category, e.message.clone()))
                .collect()
        })
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_completed_run_logs_ten_lines_in_order() {
        let rt = runtime();
        rt.verify().await;

        let expected = [
            (LogCategory::Info, "Verifying Hardware ID..."),
            (LogCategory::Success, "Device Signature Verified."),
            (LogCategory::Info, "Establishing Encrypted Tunnel..."),
            (LogCategory::Success, "Tunnel Secure (AES-256)."),
            (LogCategory::Info, "Handshaking with HQ Server..."),
            (LogCategory::Success, "Session Authorized."),
            (LogCategory::Info, "Running Anomaly Scan..."),
            (LogCategory::Success, "No Threats Detected."),
            (LogCategory::Success, "SECURITY CLEARANCE GRANTED."),
            (LogCategory::Warning, "Redirecting to Secure Lobby..."),
        ];
        let actual = chronological(&rt);
        assert_eq!(actual.len(), expected.len());
        for ((cat, msg), (want_cat, want_msg)) in actual.iter().zip(expected) {
            assert_eq!(*cat, want_cat);
            assert_eq!(msg, want_msg);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_minimum_run_duration() {
        let rt = runtime();
        let started = Instant::now();
        rt.verify().await;
        // warmup + 4 * (1500 + 500) + redirect delay, with zero jitter
        assert_eq!(started.elapsed(), Duration::from_millis(10_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_disabled_then_redirect() {
        let rt = Arc::new(runtime());
        let before = rt.snapshot().trigger.unwrap();
        assert!(before.enabled);
        assert_eq!(before.label, "Initiate Secure Link");

        let running = {
            let rt = rt.clone();
            tokio::spawn(async move { rt.verify().await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;

        let during = rt.snapshot().trigger.unwrap();
        assert!(!during.enabled);
        assert_eq!(during.label, "Initializing...");
        assert!(rt.flow().is_in_progress());

        let outcome = running.await.unwrap();
        assert!(matches!(outcome, FlowOutcome::Redirected { .. }));
        assert_eq!(rt.dashboard().location().as_deref(), Some("secure-room.html"));
        assert!(matches!(rt.flow().phase(), FlowPhase::Redirected { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_starts_run_once() {
        let rt = runtime();
        let (first, second) = tokio::join!(rt.verify(), rt.verify());

        let outcomes = [first, second];
        let ignored = outcomes.iter().filter(|o| **o == FlowOutcome::Ignored).count();
        assert_eq!(ignored, 1);
        assert_eq!(chronological(&rt).len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_after_redirect_is_ignored() {
        let rt = runtime();
        rt.verify().await;
        assert_eq!(rt.verify().await, FlowOutcome::Ignored);
        assert_eq!(chronological(&rt).len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_without_trigger_stays_put() {
        let config = DashboardConfig {
            capabilities: PageCapabilities::bare(),
            ..DashboardConfig::default()
        };
        let rt = DashboardRuntime::with_sources(
            config,
            Arc::new(SystemClock::new()),
            Arc::new(FixedRandom::new(0.0)),
        );
        let started = Instant::now();

        assert_eq!(rt.verify().await, FlowOutcome::Ignored);

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(rt.dashboard().location(), None);
        assert_eq!(rt.flow().phase(), FlowPhase::Idle);
        assert!(rt.snapshot().trigger.is_none());
    }

    // =============================================================================
    // FAILURE AND RETRY
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_retry_resumes_at_failed_step() {
        let rt = runtime_failing_once(2);

        let first = rt.verify().await;
        assert!(matches!(first, FlowOutcome::Aborted { step: 2, .. }));
        assert!(!rt.flow().is_in_progress());

        let snap = rt.snapshot();
        assert_eq!(snap.steps[0], (1, StepState::Verified));
        assert_eq!(snap.steps[1], (2, StepState::Failed));
        assert_eq!(snap.log[0].category, LogCategory::Danger);
        assert!(snap.trigger.unwrap().enabled);

        let second = rt.verify().await;
        assert!(matches!(second, FlowOutcome::Redirected { .. }));

        // Step 1 is not re-run on retry.
        let hardware_checks = chronological(&rt)
            .iter()
            .filter(|(_, m)| m == "Verifying Hardware ID...")
            .count();
        assert_eq!(hardware_checks, 1);
        assert!(rt.snapshot().steps.iter().all(|(_, s)| *s == StepState::Verified));
    }
}
