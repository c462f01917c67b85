use crate::config::FeedConfig;
use crate::domain::catalog::LOG_CATALOG;
use crate::feed::FeedProducer;
use async_trait::async_trait;
use shared_bus::{EventPublisher, FeedEvent};
use shared_types::{Clock, LogEntry, RandomSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Pick a catalog message and stamp it with the current time.
fn catalog_entry(clock: &dyn Clock, random: &dyn RandomSource) -> LogEntry {
    let (category, message) = LOG_CATALOG[random.below(LOG_CATALOG.len())];
    LogEntry::new(clock.now(), category, message)
}

/// Periodic log generator.
///
/// The interval is drawn once when the generator starts and then held for
/// the lifetime of the task.
pub struct LogGenerator {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl LogGenerator {
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
impl FeedProducer for LogGenerator {
    fn name(&self) -> &'static str {
        "log-generator"
    }

    async fn run(&self) {
        let interval = self.config.log_interval(self.random.next_f64());
        debug!(interval_ms = interval.as_millis() as u64, "Log generator interval chosen");

        loop {
            self.clock.sleep(interval).await;
            let entry = catalog_entry(self.clock.as_ref(), self.random.as_ref());
            trace!(message = %entry.message, "Generated log entry");
            self.publisher.publish(FeedEvent::Log(entry)).await;
        }
    }
}

/// Fills the log panel right after the page loads.
pub struct InitialBurst {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl InitialBurst {
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
impl FeedProducer for InitialBurst {
    fn name(&self) -> &'static str {
        "initial-burst"
    }

    async fn run(&self) {
        let spacing = Duration::from_millis(self.config.burst_spacing_ms);

        for i in 0..self.config.initial_burst {
            if i > 0 {
                self.clock.sleep(spacing).await;
            }
            let entry = catalog_entry(self.clock.as_ref(), self.random.as_ref());
            self.publisher.publish(FeedEvent::Log(entry)).await;
        }
    }
}
