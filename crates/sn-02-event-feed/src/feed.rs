//! # Feed Supervisor
//!
//! Spawns one task per producer and tears them all down together.

use crate::config::{FeedConfig, UplinkConfig};
use crate::generators::{
    DemoThreatProducer, InitialBurst, LogGenerator, ScoreGenerator, StatusFlicker,
    TrafficGenerator,
};
use crate::transport::UplinkClient;
use async_trait::async_trait;
use shared_bus::EventPublisher;
use shared_types::{Clock, PageCapabilities, RandomSource};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A timer- or network-driven source of feed events.
///
/// `run` only returns for one-shot producers; periodic ones loop until
/// their task is shut down.
#[async_trait]
pub trait FeedProducer: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    async fn run(&self);
}

/// Builder for a running feed.
pub struct EventFeed;

impl EventFeed {
    /// Start every producer the page can display.
    ///
    /// The uplink replaces the demo threat producer when it is active.
    pub fn start(
        config: FeedConfig,
        capabilities: PageCapabilities,
        uplink: UplinkConfig,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> FeedHandle {
        let config = Arc::new(config);
        let mut producers: Vec<Arc<dyn FeedProducer>> = Vec::new();

        if capabilities.log_panel {
            producers.push(Arc::new(InitialBurst::new(
                config.clone(),
                publisher.clone(),
                clock.clone(),
                random.clone(),
            )));
            producers.push(Arc::new(LogGenerator::new(
                config.clone(),
                publisher.clone(),
                clock.clone(),
                random.clone(),
            )));
        }
        if capabilities.score_gauge {
            producers.push(Arc::new(ScoreGenerator::new(
                config.clone(),
                publisher.clone(),
                clock.clone(),
                random.clone(),
            )));
        }
        if capabilities.status_indicator {
            producers.push(Arc::new(StatusFlicker::new(
                config.clone(),
                publisher.clone(),
                clock.clone(),
                random.clone(),
            )));
        }
        if capabilities.traffic_chart {
            producers.push(Arc::new(TrafficGenerator::new(
                config.clone(),
                publisher.clone(),
                clock.clone(),
                random.clone(),
            )));
        }

        if uplink.is_active() {
            producers.push(Arc::new(UplinkClient::new(uplink, publisher, clock)));
        } else {
            producers.push(Arc::new(DemoThreatProducer::new(config, publisher, clock)));
        }

        Self::spawn_all(producers)
    }

    /// Spawn the given producers under a shared shutdown signal.
    pub fn spawn_all(producers: Vec<Arc<dyn FeedProducer>>) -> FeedHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let tasks = producers
            .into_iter()
            .map(|producer| {
                let mut shutdown = shutdown_rx.clone();
                info!(producer = producer.name(), "Starting feed producer");
                tokio::spawn(async move {
                    tokio::select! {
                        _ = producer.run() => {
                            debug!(producer = producer.name(), "Feed producer finished");
                        }
                        _ = shutdown.changed() => {
                            debug!(producer = producer.name(), "Shutdown signal received");
                        }
                    }
                })
            })
            .collect();

        FeedHandle { tasks, shutdown_tx }
    }
}

/// Handle on the running producer tasks.
///
/// Dropping the handle stops the feed, the analogue of leaving the page.
pub struct FeedHandle {
    tasks: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
}

impl FeedHandle {
    pub fn producer_count(&self) -> usize {
        self.tasks.len()
    }

    /// Signal every producer to stop and wait for them to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
        info!("Event feed stopped");
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, EventTopic, FeedEvent, InMemoryEventBus};
    use shared_types::{FixedRandom, SystemClock};
    use std::time::Duration;

    fn start(caps: PageCapabilities, bus: Arc<InMemoryEventBus>) -> FeedHandle {
        EventFeed::start(
            FeedConfig::default(),
            caps,
            UplinkConfig::default(),
            bus,
            Arc::new(SystemClock::new()),
            Arc::new(FixedRandom::new(0.0)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_producers_start_on_full_page() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handle = start(PageCapabilities::dashboard(), bus);
        // burst, logs, score, flicker, traffic, demo threat
        assert_eq!(handle.producer_count(), 6);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_capable_generators_start() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut caps = PageCapabilities::bare();
        caps.score_gauge = true;
        let handle = start(caps, bus.clone());
        assert_eq!(handle.producer_count(), 2);

        let mut logs = bus.subscribe(EventFilter::topics(vec![EventTopic::Logs]));
        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert!(matches!(logs.try_recv(), Ok(None)));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_publishing() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handle = start(PageCapabilities::dashboard(), bus.clone());
        tokio::time::sleep(Duration::from_millis(5000)).await;
        handle.shutdown().await;

        let before = bus.events_published();
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(bus.events_published(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_threat_arrives_through_inbound_topic() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut inbound = bus.subscribe(EventFilter::topics(vec![EventTopic::Inbound]));
        let handle = start(PageCapabilities::dashboard(), bus.clone());

        let event = tokio::time::timeout(Duration::from_millis(10_001), inbound.recv())
            .await
            .expect("threat within 10s")
            .expect("bus open");
        assert!(matches!(event, FeedEvent::Inbound(_)));

        handle.shutdown().await;
    }
}
