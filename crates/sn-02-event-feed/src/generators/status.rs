use crate::config::FeedConfig;
use crate::feed::FeedProducer;
use async_trait::async_trait;
use shared_bus::{EventPublisher, FeedEvent};
use shared_types::{Clock, RandomSource, StatusLevel};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Occasionally flips the dashboard into alert mode.
///
/// Ticks stay on a fixed grid: time spent holding an alert is deducted from
/// the wait for the next tick.
pub struct StatusFlicker {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl StatusFlicker {
    pub fn new(
        config: Arc<FeedConfig>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            publisher,
            clock,
            random,
        }
    }
}

#[async_trait]
impl FeedProducer for StatusFlicker {
    fn name(&self) -> &'static str {
        "status-flicker"
    }

    async fn run(&self) {
        let interval = Duration::from_millis(self.config.flicker_interval_ms);
        let hold = Duration::from_millis(self.config.alert_hold_ms);
        let mut carried = Duration::ZERO;

        loop {
            self.clock.sleep(interval.saturating_sub(carried)).await;
            carried = Duration::ZERO;

            if !self.random.chance(self.config.flicker_probability) {
                continue;
            }

            info!("Status flicker: entering alert mode");
            self.publisher
                .publish(FeedEvent::Status(StatusLevel::Alert))
                .await;
            self.clock.sleep(hold).await;
            self.publisher
                .publish(FeedEvent::Status(StatusLevel::Secure))
                .await;
            carried = hold;
        }
    }
}
