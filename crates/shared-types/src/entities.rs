//! # Core Domain Entities
//!
//! Entities that flow from producers (verification flow, feed generators,
//! uplink) into the dashboard.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for log timestamps (24-hour clock).
pub const LOG_TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// LOG ENTRIES
// =============================================================================

/// Category of a log line. Drives the colour a renderer picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Info,
    Success,
    Warning,
    Danger,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line in the log panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time at creation.
    pub timestamp: DateTime<Local>,
    pub category: LogCategory,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Local>, category: LogCategory, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            category,
            message: message.into(),
        }
    }

    /// Timestamp rendered as `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        self.timestamp.format(LOG_TIME_FORMAT).to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time_label(), self.message)
    }
}

// =============================================================================
// THREATS AND DEVICES
// =============================================================================

/// Threat severity as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured, severity-tagged security event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatAlert {
    pub severity: Severity,
    pub anomaly_code: String,
    pub device_id: String,
    pub details: String,
}

impl ThreatAlert {
    /// Critical threats log as `danger`, everything else as `warning`.
    pub fn log_category(&self) -> LogCategory {
        if self.severity == Severity::Critical {
            LogCategory::Danger
        } else {
            LogCategory::Warning
        }
    }

    pub fn log_message(&self) -> String {
        format!("⚠️ {} detected on {}", self.anomaly_code, self.device_id)
    }

    /// Headline for the prominent alert block.
    pub fn headline(&self) -> String {
        format!("{} THREAT DETECTED", self.severity)
    }
}

/// Authorization state of a monitored device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Authorized,
    Blocked,
}

impl DeviceStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Authorized => Self::Blocked,
            Self::Blocked => Self::Authorized,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorized => f.write_str("AUTHORIZED"),
            Self::Blocked => f.write_str("BLOCKED"),
        }
    }
}

/// Status change pushed for a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUpdate {
    pub device_id: String,
    pub status: DeviceStatus,
}

// =============================================================================
// METRICS
// =============================================================================

/// Anomaly score with one decimal of precision, stored as tenths of a
/// percent so formatting is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score {
    tenths: u16,
}

impl Score {
    /// Lowest emitted score (85.0%).
    pub const MIN_TENTHS: u16 = 850;
    /// Highest emitted score (99.0%).
    pub const MAX_TENTHS: u16 = 990;

    /// Map a uniform sample in `[0, 1)` onto `[85.0, 99.0]`.
    pub fn from_unit(sample: f64) -> Self {
        let span = f64::from(Self::MAX_TENTHS - Self::MIN_TENTHS);
        let raw = (f64::from(Self::MIN_TENTHS) + sample * span).round();
        let tenths = raw.clamp(f64::from(Self::MIN_TENTHS), f64::from(Self::MAX_TENTHS)) as u16;
        Self { tenths }
    }

    pub fn tenths(&self) -> u16 {
        self.tenths
    }

    pub fn as_percent(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

/// One point of the traffic series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    /// `HH:MM:SS` label for the x axis.
    pub label: String,
    pub packets_per_second: f64,
}

// =============================================================================
// STATUS
// =============================================================================

/// Dashboard-wide status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    #[default]
    Secure,
    Alert,
}

impl StatusLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Secure => "SECURE",
            Self::Alert => "ALERT MODE",
        }
    }
}

/// Uplink connectivity as seen by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No uplink configured (demo mode).
    #[default]
    Offline,
    Established,
    Lost,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offline => "DEMO MODE",
            Self::Established => "SYSTEM SECURE",
            Self::Lost => "CONNECTION LOST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn alert(severity: Severity) -> ThreatAlert {
        ThreatAlert {
            severity,
            anomaly_code: "BEHAVIORAL_ANOMALY".into(),
            device_id: "SOLDIER_76".into(),
            details: "details".into(),
        }
    }

    #[test]
    fn test_log_entry_display() {
        let ts = Local.with_ymd_and_hms(2026, 1, 21, 14, 5, 9).unwrap();
        let entry = LogEntry::new(ts, LogCategory::Info, "System health check: OK");
        assert_eq!(entry.time_label(), "14:05:09");
        assert_eq!(entry.to_string(), "[14:05:09] System health check: OK");
    }

    #[test]
    fn test_threat_log_category() {
        assert_eq!(alert(Severity::Critical).log_category(), LogCategory::Danger);
        assert_eq!(alert(Severity::High).log_category(), LogCategory::Warning);
        assert_eq!(alert(Severity::Low).log_category(), LogCategory::Warning);
    }

    #[test]
    fn test_threat_messages() {
        let threat = alert(Severity::High);
        assert_eq!(threat.log_message(), "⚠️ BEHAVIORAL_ANOMALY detected on SOLDIER_76");
        assert_eq!(threat.headline(), "HIGH THREAT DETECTED");
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(Score::from_unit(0.0).to_string(), "85.0");
        assert_eq!(Score::from_unit(0.999_999).to_string(), "99.0");
        assert_eq!(Score::from_unit(0.5).to_string(), "92.0");
        assert_eq!(Score::from_unit(0.5).as_percent(), 92.0);
    }

    #[test]
    fn test_device_status_toggle() {
        assert_eq!(DeviceStatus::Authorized.toggled(), DeviceStatus::Blocked);
        assert_eq!(DeviceStatus::Blocked.toggled(), DeviceStatus::Authorized);
    }

    proptest! {
        #[test]
        fn prop_score_in_range_with_one_decimal(sample in 0.0f64..1.0) {
            let score = Score::from_unit(sample);
            prop_assert!(score.as_percent() >= 85.0 && score.as_percent() <= 99.0);
            let text = score.to_string();
            let (_, frac) = text.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 1);
        }
    }
}
