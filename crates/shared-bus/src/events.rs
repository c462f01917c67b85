//! # Feed Events
//!
//! Every event that flows from a producer to the dashboard consumer.

use serde::{Deserialize, Serialize};
use shared_types::{ConnectionState, InboundMessage, LogEntry, Score, StatusLevel, TrafficSample};

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// A synthetic log line for the log panel.
    Log(LogEntry),

    /// A new anomaly score reading.
    Score(Score),

    /// Status indicator changed.
    Status(StatusLevel),

    /// A new traffic sample for the rolling chart.
    Traffic(TrafficSample),

    /// A structured push message (demo producer or uplink).
    Inbound(InboundMessage),

    /// Uplink connectivity changed.
    Connection(ConnectionState),
}

impl FeedEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Log(_) => EventTopic::Logs,
            Self::Score(_) | Self::Traffic(_) => EventTopic::Metrics,
            Self::Status(_) => EventTopic::Status,
            Self::Inbound(_) => EventTopic::Inbound,
            Self::Connection(_) => EventTopic::Uplink,
        }
    }

    /// Short name used as a tracing field and metric label.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Log(_) => "log",
            Self::Score(_) => "score",
            Self::Status(_) => "status",
            Self::Traffic(_) => "traffic",
            Self::Inbound(msg) => msg.kind(),
            Self::Connection(_) => "connection",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Log panel lines.
    Logs,
    /// Score and traffic readings.
    Metrics,
    /// Status indicator changes.
    Status,
    /// Structured push messages.
    Inbound,
    /// Uplink connectivity.
    Uplink,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &FeedEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
