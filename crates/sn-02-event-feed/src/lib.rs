//! # SN-02: Event Feed
//!
//! Stands in for a backend push feed by manufacturing telemetry on timers.
//!
//! ## Producers
//!
//! | Producer | Cadence | Publishes |
//! |----------|---------|-----------|
//! | `InitialBurst` | 8 entries, 300ms apart | `FeedEvent::Log` |
//! | `LogGenerator` | every 2000-5000ms | `FeedEvent::Log` |
//! | `ScoreGenerator` | every 3000ms | `FeedEvent::Score` |
//! | `StatusFlicker` | every 8000ms, 10% chance | `FeedEvent::Status` (alert, then secure 3000ms later) |
//! | `TrafficGenerator` | every 1000ms | `FeedEvent::Traffic` |
//! | `DemoThreatProducer` | once, 10000ms after start | `FeedEvent::Inbound` |
//! | `UplinkClient` | on push | `FeedEvent::Inbound`, `FeedEvent::Connection` |
//!
//! Every producer implements [`FeedProducer`] and only ever talks to the
//! event bus. The demo threat producer and the uplink are interchangeable:
//! [`EventFeed::start`] runs the uplink when one is configured and the demo
//! producer otherwise.

pub mod config;
pub mod domain;
pub mod feed;
pub mod generators;
pub mod transport;

pub use config::{FeedConfig, UplinkConfig};
pub use domain::catalog::{demo_threat, LOG_CATALOG};
pub use domain::errors::TransportError;
pub use feed::{EventFeed, FeedHandle, FeedProducer};
pub use generators::{
    DemoThreatProducer, InitialBurst, LogGenerator, ScoreGenerator, StatusFlicker,
    TrafficGenerator,
};
pub use transport::UplinkClient;
