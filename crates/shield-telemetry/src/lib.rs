//! # Shield Telemetry
//!
//! Observability for the SHIELD-NET dashboard runtime.
//!
//! - **Logs**: `tracing` events rendered by a `tracing-subscriber` fmt layer,
//!   pretty for development or JSON for log shippers.
//! - **Metrics**: Prometheus counters for feed traffic, flow outcomes and
//!   uplink health, exposed as text via [`encode_metrics`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shield_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SN_SERVICE_NAME` | `shieldnet` | Service name attached to logs |
//! | `SN_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SN_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `SN_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, DASHBOARD_SCORE, FEED_EVENTS_CONSUMED,
    FLOW_RUNS, FLOW_STEP_DURATION, LOG_ENTRIES_EVICTED, THREAT_ALERTS, UPLINK_DISCONNECTS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logging = init_logging(&config)?;

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Shutting down telemetry");
    }
}
