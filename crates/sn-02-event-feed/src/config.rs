//! Configuration for the Event Feed and the uplink

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timer cadences of the simulated feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Lower bound of the log interval
    pub log_interval_min_ms: u64,
    /// Width of the random part of the log interval
    pub log_interval_span_ms: u64,
    /// Entries emitted right after start
    pub initial_burst: usize,
    /// Spacing between burst entries
    pub burst_spacing_ms: u64,
    pub score_interval_ms: u64,
    pub flicker_interval_ms: u64,
    /// Chance per flicker tick of entering alert mode
    pub flicker_probability: f64,
    /// How long alert mode lasts before reverting to secure
    pub alert_hold_ms: u64,
    /// Delay before the one-shot demo threat alert
    pub demo_threat_delay_ms: u64,
    pub traffic_interval_ms: u64,
    /// Samples kept in the traffic series
    pub traffic_window: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            log_interval_min_ms: 2000,
            log_interval_span_ms: 3000,
            initial_burst: 8,
            burst_spacing_ms: 300,
            score_interval_ms: 3000,
            flicker_interval_ms: 8000,
            flicker_probability: 0.1,
            alert_hold_ms: 3000,
            demo_threat_delay_ms: 10_000,
            traffic_interval_ms: 1000,
            traffic_window: 20,
        }
    }
}

impl FeedConfig {
    /// Log interval for a uniform sample in `[0, 1)`.
    pub fn log_interval(&self, sample: f64) -> Duration {
        Duration::from_millis(self.log_interval_min_ms)
            + Duration::from_millis(self.log_interval_span_ms).mul_f64(sample)
    }
}

/// Push-transport (WebSocket) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UplinkConfig {
    /// Connect to a backend instead of running the demo threat producer
    pub enabled: bool,
    /// Use `wss://` instead of `ws://`
    pub secure: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Full URL override; implies `enabled`
    pub url: Option<String>,
    /// Fixed wait before reconnecting after a close
    pub reconnect_delay_ms: u64,
    /// Give up after this many consecutive failed connections (None = never)
    pub max_attempts: Option<u32>,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secure: false,
            host: "localhost".to_string(),
            port: 5000,
            path: "/ws".to_string(),
            url: None,
            reconnect_delay_ms: 3000,
            max_attempts: None,
        }
    }
}

impl UplinkConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled || self.url.is_some()
    }

    /// `ws[s]://{host}:{port}{path}` unless a full URL was given.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}
