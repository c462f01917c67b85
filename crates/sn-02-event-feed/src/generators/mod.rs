//! Timer-driven producers of simulated telemetry.

mod logs;
mod metrics;
mod status;
mod threat;

pub use logs::{InitialBurst, LogGenerator};
pub use metrics::{ScoreGenerator, TrafficGenerator};
pub use status::StatusFlicker;
pub use threat::DemoThreatProducer;
