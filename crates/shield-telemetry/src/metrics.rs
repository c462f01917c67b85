//! Prometheus metrics for the SHIELD-NET dashboard.
//!
//! All metrics follow the naming convention: `sn_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // FEED
    // =========================================================================

    /// Events applied by the dashboard consumer, by kind
    pub static ref FEED_EVENTS_CONSUMED: CounterVec = CounterVec::new(
        Opts::new("sn_feed_events_consumed_total", "Feed events applied to the dashboard"),
        &["kind"]
    ).expect("metric creation failed");

    /// Log lines evicted from the bounded log panel
    pub static ref LOG_ENTRIES_EVICTED: Counter = Counter::new(
        "sn_log_panel_evicted_total",
        "Log entries evicted from the log panel"
    ).expect("metric creation failed");

    /// Threat alerts rendered, by severity
    pub static ref THREAT_ALERTS: CounterVec = CounterVec::new(
        Opts::new("sn_threat_alerts_total", "Threat alerts rendered"),
        &["severity"]
    ).expect("metric creation failed");

    /// Latest anomaly score shown
    pub static ref DASHBOARD_SCORE: Gauge = Gauge::new(
        "sn_dashboard_score_percent",
        "Latest anomaly score readout"
    ).expect("metric creation failed");

    // =========================================================================
    // VERIFICATION FLOW
    // =========================================================================

    /// Flow runs by outcome (redirected, aborted, ignored)
    pub static ref FLOW_RUNS: CounterVec = CounterVec::new(
        Opts::new("sn_flow_runs_total", "Verification flow runs"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Time spent inside a single verification step
    pub static ref FLOW_STEP_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sn_flow_step_duration_seconds",
            "Simulated verification step duration"
        ).buckets(exponential_buckets(0.25, 2.0, 6).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // UPLINK
    // =========================================================================

    /// Uplink connection losses
    pub static ref UPLINK_DISCONNECTS: Counter = Counter::new(
        "sn_uplink_disconnects_total",
        "Uplink connection losses"
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(FEED_EVENTS_CONSUMED.clone()),
        Box::new(LOG_ENTRIES_EVICTED.clone()),
        Box::new(THREAT_ALERTS.clone()),
        Box::new(DASHBOARD_SCORE.clone()),
        Box::new(FLOW_RUNS.clone()),
        Box::new(FLOW_STEP_DURATION.clone()),
        Box::new(UPLINK_DISCONNECTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
