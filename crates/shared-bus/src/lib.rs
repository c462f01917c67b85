//! # Shared Bus - Feed Event Bus
//!
//! Single producer/consumer seam of the dashboard.
//!
//! ```text
//! ┌──────────────────┐
//! │ Log generator    │──┐
//! │ Score generator  │──┤   publish()    ┌──────────────┐  subscribe()  ┌───────────────┐
//! │ Status flicker   │──┼──────────────→ │  Event Bus   │ ────────────→ │ Feed consumer │
//! │ Demo threat      │──┤                └──────────────┘               └───────────────┘
//! │ Uplink (ws)      │──┘
//! └──────────────────┘
//! ```
//!
//! The demo threat producer and the WebSocket uplink publish the same
//! [`FeedEvent::Inbound`] events, so the consumer cannot tell them apart.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, FeedEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
