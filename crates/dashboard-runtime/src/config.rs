//! # Runtime Configuration
//!
//! Defaults match the shipped dashboard page; every field can be overridden
//! from `SN_*` environment variables.

use serde::{Deserialize, Serialize};
use shared_types::PageCapabilities;
use sn_01_verification_flow::FlowConfig;
use sn_02_event_feed::{FeedConfig, UplinkConfig};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub flow: FlowConfig,
    pub feed: FeedConfig,
    pub uplink: UplinkConfig,
    pub capabilities: PageCapabilities,
    /// Where theme and role are persisted.
    pub preferences_path: PathBuf,
    pub login_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            flow: FlowConfig::default(),
            feed: FeedConfig::default(),
            uplink: UplinkConfig::default(),
            capabilities: PageCapabilities::dashboard(),
            preferences_path: PathBuf::from("shieldnet-prefs.json"),
            login_delay_ms: 1000,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SN_PREFS_PATH`: preferences file
    /// - `SN_UPLINK_URL`: full uplink URL (enables the uplink)
    /// - `SN_UPLINK_ENABLED`, `SN_UPLINK_SECURE`, `SN_UPLINK_HOST`,
    ///   `SN_UPLINK_PORT`: uplink endpoint parts
    /// - `SN_UPLINK_RECONNECT_MS`, `SN_UPLINK_MAX_ATTEMPTS`: reconnect policy
    /// - `SN_DEMO_THREAT_MS`: delay before the demo threat alert
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("SN_PREFS_PATH") {
            config.preferences_path = PathBuf::from(path);
        }
        if let Ok(url) = env::var("SN_UPLINK_URL") {
            config.uplink.url = Some(url);
        }
        if let Ok(host) = env::var("SN_UPLINK_HOST") {
            config.uplink.host = host;
        }
        if let Some(enabled) = env_flag("SN_UPLINK_ENABLED") {
            config.uplink.enabled = enabled;
        }
        if let Some(secure) = env_flag("SN_UPLINK_SECURE") {
            config.uplink.secure = secure;
        }
        if let Some(port) = env_parse("SN_UPLINK_PORT") {
            config.uplink.port = port;
        }
        if let Some(ms) = env_parse("SN_UPLINK_RECONNECT_MS") {
            config.uplink.reconnect_delay_ms = ms;
        }
        if let Some(max) = env_parse("SN_UPLINK_MAX_ATTEMPTS") {
            config.uplink.max_attempts = Some(max);
        }
        if let Some(ms) = env_parse("SN_DEMO_THREAT_MS") {
            config.feed.demo_threat_delay_ms = ms;
        }

        config
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}
