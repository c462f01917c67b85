use crate::config::FeedConfig;
use crate::feed::FeedProducer;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use shared_bus::{EventPublisher, FeedEvent};
use shared_types::{Clock, RandomSource, Score, TrafficSample, LOG_TIME_FORMAT};
use std::sync::Arc;
use std::time::Duration;

/// Publishes a fresh anomaly score every few seconds.
pub struct ScoreGenerator {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl ScoreGenerator {
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
impl FeedProducer for ScoreGenerator {
    fn name(&self) -> &'static str {
        "score-generator"
    }

    async fn run(&self) {
        let interval = Duration::from_millis(self.config.score_interval_ms);
        loop {
            self.clock.sleep(interval).await;
            let score = Score::from_unit(self.random.next_f64());
            self.publisher.publish(FeedEvent::Score(score)).await;
        }
    }
}

/// Packets-per-second series behind the traffic chart.
///
/// Seeds a full window of history on start, then appends one point per
/// tick following a slow sine wave with noise on top.
pub struct TrafficGenerator {
    config: Arc<FeedConfig>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl TrafficGenerator {
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

    /// History point: `2000 + r * 1500`.
    pub fn seed_value(sample: f64) -> f64 {
        2000.0 + sample * 1500.0
    }

    /// Live point: `2500 + r * 1000 + sin(t_ms / 2000) * 500`.
    pub fn live_value(sample: f64, at: DateTime<Local>) -> f64 {
        let wave = (at.timestamp_millis() as f64 / 2000.0).sin() * 500.0;
        2500.0 + sample * 1000.0 + wave
    }

    fn sample(at: DateTime<Local>, packets_per_second: f64) -> TrafficSample {
        TrafficSample {
            label: at.format(LOG_TIME_FORMAT).to_string(),
            packets_per_second,
        }
    }
}

#[async_trait]
impl FeedProducer for TrafficGenerator {
    fn name(&self) -> &'static str {
        "traffic-generator"
    }

    async fn run(&self) {
        let now = self.clock.now();
        let window = self.config.traffic_window as i64;

        // Seed labels count back one second per point from now.
        for i in 0..window {
            let at = now - chrono::Duration::seconds(window - i);
            let value = Self::seed_value(self.random.next_f64());
            self.publisher
                .publish(FeedEvent::Traffic(Self::sample(at, value)))
                .await;
        }

        let interval = Duration::from_millis(self.config.traffic_interval_ms);
        loop {
            self.clock.sleep(interval).await;
            let at = self.clock.now();
            let value = Self::live_value(self.random.next_f64(), at);
            self.publisher
                .publish(FeedEvent::Traffic(Self::sample(at, value)))
                .await;
        }
    }
}
