//! Fixed content the simulated feed draws from.

use shared_types::{LogCategory, Severity, ThreatAlert};

/// Messages the log generator picks from, uniformly at random.
pub const LOG_CATALOG: [(LogCategory, &str); 10] = [
    (LogCategory::Success, "Connection authenticated successfully"),
    (LogCategory::Info, "Monitoring network traffic..."),
    (LogCategory::Success, "Threat scan completed - No anomalies detected"),
    (LogCategory::Warning, "Unusual login attempt from IP 192.168.1.45"),
    (LogCategory::Success, "AI shield active - Protection enabled"),
    (LogCategory::Info, "Data encryption verified"),
    (LogCategory::Success, "Secure channel established"),
    (LogCategory::Info, "System health check: OK"),
    (LogCategory::Warning, "High bandwidth usage detected"),
    (LogCategory::Success, "Firewall rules updated"),
];

/// The single alert the demo feed injects.
pub fn demo_threat() -> ThreatAlert {
    ThreatAlert {
        severity: Severity::High,
        anomaly_code: "BEHAVIORAL_ANOMALY".to_string(),
        device_id: "SOLDIER_76".to_string(),
        details: "Unusual movement pattern detected matching known exhaustion profiles."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_danger_entries() {
        assert!(LOG_CATALOG
            .iter()
            .all(|(category, _)| *category != LogCategory::Danger));
    }

    #[test]
    fn test_demo_threat_logs_as_warning() {
        let threat = demo_threat();
        assert_eq!(threat.log_category(), LogCategory::Warning);
        assert_eq!(
            threat.log_message(),
            "⚠️ BEHAVIORAL_ANOMALY detected on SOLDIER_76"
        );
    }
}
