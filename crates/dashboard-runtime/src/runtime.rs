//! # Dashboard Runtime
//!
//! Owns the bus, the dashboard and the components, and wires them:
//!
//! ```text
//!  feed producers ──FeedEvent──→ InMemoryEventBus ──→ FeedConsumer ──┐
//!                                                                   ↓
//!  VerificationFlowService ──FlowSurface / LogSink────────────→ Dashboard
//!            └──Navigator──→ DashboardNavigator ─────────────────────┘
//! ```

use crate::adapters::{DashboardNavigator, MeteredVerifier};
use crate::config::DashboardConfig;
use crate::consumer::FeedConsumer;
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::devices::DeviceControl;
use crate::login::LoginService;
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_types::{Clock, RandomSource, SystemClock, ThreadRandom};
use shield_telemetry::FLOW_RUNS;
use sn_01_verification_flow::{
    FlowOutcome, SimulatedStepVerifier, StepVerifier, VerificationFlowApi,
    VerificationFlowService,
};
use sn_02_event_feed::{EventFeed, FeedHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct DashboardRuntime {
    config: DashboardConfig,
    bus: Arc<InMemoryEventBus>,
    dashboard: Dashboard,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    navigator: Arc<DashboardNavigator>,
    flow: Arc<VerificationFlowService>,
    consumer: Option<JoinHandle<()>>,
    feed: Option<FeedHandle>,
}

impl DashboardRuntime {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_sources(config, Arc::new(SystemClock::new()), Arc::new(ThreadRandom))
    }

    pub fn with_sources(
        config: DashboardConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let verifier = Arc::new(SimulatedStepVerifier::new(
            clock.clone(),
            random.clone(),
            &config.flow,
        ));
        Self::with_verifier(config, clock, random, verifier)
    }

    /// Build with a custom step verifier, e.g. a fault-injecting one.
    pub fn with_verifier(
        config: DashboardConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        verifier: Arc<dyn StepVerifier>,
    ) -> Self {
        let dashboard = Dashboard::new(config.capabilities, &config.flow, config.feed.traffic_window);
        let navigator = Arc::new(DashboardNavigator::new(dashboard.clone()));

        let flow = Arc::new(VerificationFlowService::new(
            config.flow.clone(),
            Arc::new(dashboard.clone()),
            Arc::new(dashboard.clone()),
            navigator.clone(),
            Arc::new(MeteredVerifier::new(verifier)),
            clock.clone(),
        ));

        Self {
            config,
            bus: Arc::new(InMemoryEventBus::new()),
            dashboard,
            clock,
            random,
            navigator,
            flow,
            consumer: None,
            feed: None,
        }
    }

    /// Start the consumer and then the feed producers.
    ///
    /// The consumer subscribes first so the initial burst is not missed.
    pub fn start_feed(&mut self) {
        if self.feed.is_some() {
            warn!("Event feed already running");
            return;
        }

        let subscription = self.bus.subscribe(EventFilter::all());
        let consumer = FeedConsumer::new(self.dashboard.clone(), self.clock.clone());
        self.consumer = Some(tokio::spawn(consumer.run(subscription)));

        let handle = EventFeed::start(
            self.config.feed.clone(),
            self.config.capabilities,
            self.config.uplink.clone(),
            self.bus.clone(),
            self.clock.clone(),
            self.random.clone(),
        );
        info!(
            producers = handle.producer_count(),
            uplink = self.config.uplink.is_active(),
            "Event feed started"
        );
        self.feed = Some(handle);
    }

    /// Run one verification attempt to its end.
    pub async fn verify(&self) -> FlowOutcome {
        let outcome = self.flow.start().await;
        FLOW_RUNS.with_label_values(&[outcome.label()]).inc();
        outcome
    }

    /// Let the feed run for a while on the runtime clock.
    pub async fn run_for(&self, duration: Duration) {
        self.clock.sleep(duration).await;
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(
            self.clock.clone(),
            self.navigator.clone(),
            self.config.login_delay(),
        )
    }

    pub fn device_control(&self) -> DeviceControl {
        DeviceControl::new(self.dashboard.clone())
    }

    pub fn flow(&self) -> &dyn VerificationFlowApi {
        self.flow.as_ref()
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.snapshot()
    }

    /// Stop the feed, then the consumer.
    pub async fn shutdown(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
        // Let the consumer drain what the producers already published.
        tokio::task::yield_now().await;
        if let Some(consumer) = self.consumer.take() {
            consumer.abort();
        }
        info!("Dashboard runtime stopped");
    }
}
