//! # Event Feed Integration
//!
//! Producers publish onto the bus, the consumer applies events to the
//! dashboard. All timing runs on paused tokio time.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dashboard_runtime::{DashboardConfig, DashboardRuntime};
    use shared_types::{
        FixedRandom, PageCapabilities, RandomSource, SeededRandom, StatusLevel, SystemClock,
    };

    fn runtime_with(config: DashboardConfig, random: Arc<dyn RandomSource>) -> DashboardRuntime {
        DashboardRuntime::with_sources(config, Arc::new(SystemClock::new()), random)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_panel_stays_capped_with_flow_and_feed_sharing_it() {
        let mut rt = runtime_with(DashboardConfig::default(), Arc::new(SeededRandom::new(42)));
        rt.start_feed();

        let mut max_seen = 0;
        let sampler = async {
            for _ in 0..120 {
                advance(500).await;
                max_seen = max_seen.max(rt.snapshot().log.len());
            }
        };
        let (outcome, _) = tokio::join!(rt.verify(), sampler);
        rt.shutdown().await;

        assert_eq!(outcome.label(), "redirected");
        assert_eq!(max_seen, 20);
        assert!(rt.dashboard().with_state(|s| s.log.evicted()) > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scores_stay_in_range() {
        let mut rt = runtime_with(DashboardConfig::default(), Arc::new(SeededRandom::new(7)));
        rt.start_feed();

        for _ in 0..30 {
            advance(3000).await;
            advance(1).await;
            let score = rt.snapshot().score.expect("score after first tick");
            assert!((85.0..=99.0).contains(&score.as_percent()));
            assert_eq!(score.to_string().split_once('.').unwrap().1.len(), 1);
        }
        rt.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reverts_three_seconds_after_alert() {
        let mut rt = runtime_with(DashboardConfig::default(), Arc::new(FixedRandom::new(0.0)));
        rt.start_feed();

        advance(7_999).await;
        assert_eq!(rt.snapshot().status, StatusLevel::Secure);
        advance(2).await;
        assert_eq!(rt.snapshot().status, StatusLevel::Alert);
        advance(2_998).await;
        assert_eq!(rt.snapshot().status, StatusLevel::Alert);
        advance(2).await;
        assert_eq!(rt.snapshot().status, StatusLevel::Secure);

        rt.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_threat_reaches_log_and_alerts() {
        let mut rt = runtime_with(DashboardConfig::default(), Arc::new(FixedRandom::new(0.0)));
        rt.start_feed();

        advance(9_999).await;
        assert!(rt.snapshot().alerts.is_empty());
        advance(2).await;

        let snap = rt.snapshot();
        assert_eq!(snap.alerts.len(), 1);
        // A catalog line lands on the same tick, so order is not fixed.
        assert!(snap
            .log
            .iter()
            .any(|e| e.message == "⚠️ BEHAVIORAL_ANOMALY detected on SOLDIER_76"));
        rt.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bare_page_runs_nothing_visible() {
        let config = DashboardConfig {
            capabilities: PageCapabilities::bare(),
            ..DashboardConfig::default()
        };
        let mut rt = runtime_with(config, Arc::new(FixedRandom::new(0.0)));
        rt.start_feed();
        advance(30_000).await;
        rt.shutdown().await;

        let snap = rt.snapshot();
        assert!(snap.log.is_empty());
        assert!(snap.score.is_none());
        assert!(snap.traffic.is_empty());
        assert!(snap.alerts.is_empty());
        assert_eq!(snap.status, StatusLevel::Secure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_traffic_window_and_network_load() {
        let mut rt = runtime_with(DashboardConfig::default(), Arc::new(FixedRandom::new(0.5)));
        rt.start_feed();
        advance(5_001).await;

        let snap = rt.snapshot();
        assert_eq!(snap.traffic.len(), 20);
        let last = snap.traffic.last().unwrap().packets_per_second;
        assert_eq!(snap.network_load, Some(last.floor() as u64));
        rt.shutdown().await;
    }
}
