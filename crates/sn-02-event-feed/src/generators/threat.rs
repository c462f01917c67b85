use crate::config::FeedConfig;
use crate::domain::catalog::demo_threat;
use crate::feed::FeedProducer;
use async_trait::async_trait;
use shared_bus::{EventPublisher, FeedEvent};
use shared_types::{Clock, InboundMessage};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One-shot stand-in for a backend push.
///
/// Publishes on the inbound topic so the dashboard handles it exactly like
/// a message received over the uplink.
pub struct DemoThreatProducer {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DemoThreatProducer {
    pub fn new(
        config: Arc<FeedConfig>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            publisher,
            clock,
        }
    }
}

#[async_trait]
impl FeedProducer for DemoThreatProducer {
    fn name(&self) -> &'static str {
        "demo-threat"
    }

    async fn run(&self) {
        self.clock
            .sleep(Duration::from_millis(self.config.demo_threat_delay_ms))
            .await;

        let threat = demo_threat();
        info!(
            severity = %threat.severity,
            code = %threat.anomaly_code,
            device = %threat.device_id,
            "Injecting demo threat alert"
        );
        self.publisher
            .publish(FeedEvent::Inbound(InboundMessage::ThreatAlert(threat)))
            .await;
    }
}
