//! # Feed Consumer
//!
//! The single subscriber that applies bus events to the dashboard. Demo
//! and uplink messages both end up in [`FeedConsumer::handle_inbound`].

use crate::dashboard::Dashboard;
use shared_bus::{FeedEvent, Subscription};
use shared_types::{Clock, ConnectionState, InboundMessage, LogEntry};
use shield_telemetry::{log_event, FEED_EVENTS_CONSUMED, THREAT_ALERTS, UPLINK_DISCONNECTS};
use std::sync::Arc;
use tracing::debug;

pub struct FeedConsumer {
    dashboard: Dashboard,
    clock: Arc<dyn Clock>,
}

impl FeedConsumer {
    pub fn new(dashboard: Dashboard, clock: Arc<dyn Clock>) -> Self {
        Self { dashboard, clock }
    }

    /// Drain the subscription until the bus closes.
    pub async fn run(self, mut subscription: Subscription) {
        while let Some(event) = subscription.recv().await {
            self.handle(event);
        }
        debug!("Event bus closed, feed consumer exiting");
    }

    pub fn handle(&self, event: FeedEvent) {
        FEED_EVENTS_CONSUMED.with_label_values(&[event.kind()]).inc();

        match event {
            FeedEvent::Log(entry) => self.dashboard.push_log(entry),
            FeedEvent::Score(score) => self.dashboard.set_score(score),
            FeedEvent::Status(status) => self.dashboard.set_status(status),
            FeedEvent::Traffic(sample) => self.dashboard.push_traffic(sample),
            FeedEvent::Inbound(message) => self.handle_inbound(message),
            FeedEvent::Connection(state) => {
                if state == ConnectionState::Lost {
                    UPLINK_DISCONNECTS.inc();
                }
                log_event!(info, "uplink", "Connection state changed", state = state.label());
                self.dashboard.set_connection(state);
            }
        }
    }

    /// Route a structured message by its type.
    pub fn handle_inbound(&self, message: InboundMessage) {
        match message {
            InboundMessage::ThreatAlert(alert) => {
                THREAT_ALERTS.with_label_values(&[alert.severity.as_str()]).inc();
                log_event!(
                    warn,
                    "threats",
                    "Threat alert received",
                    severity = %alert.severity,
                    code = %alert.anomaly_code,
                    device = %alert.device_id
                );

                let entry = LogEntry::new(self.clock.now(), alert.log_category(), alert.log_message());
                self.dashboard.push_alert(alert);
                self.dashboard.push_log(entry);
            }
            InboundMessage::DeviceUpdate(update) => {
                let previous = self.dashboard.set_device(&update.device_id, update.status);
                log_event!(
                    info,
                    "devices",
                    "Device status updated",
                    device = %update.device_id,
                    status = %update.status,
                    previous = ?previous
                );
            }
        }
    }
}
