//! WebSocket uplink to the HQ feed.
//!
//! ```text
//! connect ──ok──→ Established ──frames──→ Inbound(..)
//!    │                  │
//!    │ err              │ close / error
//!    ↓                  ↓
//!  Lost ←───────────────┘
//!    │
//!    └── wait reconnect_delay ──→ connect
//! ```

use crate::config::UplinkConfig;
use crate::domain::errors::TransportError;
use crate::feed::FeedProducer;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use shared_bus::{EventPublisher, FeedEvent};
use shared_types::{Clock, ConnectionState, InboundMessage};
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// Reconnecting WebSocket client publishing decoded messages to the bus.
pub struct UplinkClient {
    config: UplinkConfig,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl UplinkClient {
    pub fn new(
        config: UplinkConfig,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            publisher,
            clock,
        }
    }

    /// Connection loop. Only returns once the attempt cap is hit.
    pub async fn connection_loop(&self) -> TransportError {
        let url = self.config.endpoint();
        let mut failed_attempts = 0u32;

        loop {
            match self.run_connection(&url).await {
                Ok(()) => {
                    failed_attempts = 0;
                    info!(%url, "Uplink closed by peer");
                }
                Err(TransportError::Connect { url, source }) => {
                    failed_attempts += 1;
                    warn!(%url, attempt = failed_attempts, error = %source, "Uplink connect failed");
                }
                Err(e) => {
                    failed_attempts = 0;
                    warn!(%url, error = %e, "Uplink connection dropped");
                }
            }

            self.publisher
                .publish(FeedEvent::Connection(ConnectionState::Lost))
                .await;

            if let Some(max) = self.config.max_attempts {
                if failed_attempts >= max {
                    error!(%url, attempts = failed_attempts, "Giving up on uplink");
                    return TransportError::AttemptsExhausted(failed_attempts);
                }
            }

            self.clock.sleep(self.config.reconnect_delay()).await;
        }
    }

    /// Run a single connection until the peer closes it or it errors.
    async fn run_connection(&self, url: &str) -> Result<(), TransportError> {
        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|source| TransportError::Connect {
                url: url.to_string(),
                source,
            })?;

        info!(%url, "Uplink established");
        self.publisher
            .publish(FeedEvent::Connection(ConnectionState::Established))
            .await;

        let (mut write, mut read) = ws_stream.split();

        while let Some(msg) = read.next().await {
            match msg? {
                Message::Text(text) => self.handle_text_message(text.as_str()).await,
                Message::Ping(data) => write.send(Message::Pong(data)).await?,
                Message::Close(_) => return Ok(()),
                _ => {}
            }
        }

        Ok(())
    }

    /// Decode a text frame and forward it. Unknown types are ignored and
    /// malformed frames are dropped.
    async fn handle_text_message(&self, text: &str) {
        match InboundMessage::parse(text) {
            Ok(Some(message)) => {
                debug!(kind = message.kind(), "Uplink message received");
                self.publisher.publish(FeedEvent::Inbound(message)).await;
            }
            Ok(None) => debug!("Ignoring uplink message with unknown type"),
            Err(e) => warn!(error = %e, "Dropping malformed uplink message"),
        }
    }
}

#[async_trait]
impl FeedProducer for UplinkClient {
    fn name(&self) -> &'static str {
        "uplink"
    }

    async fn run(&self) {
        let reason = self.connection_loop().await;
        error!(error = %reason, "Uplink stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
    use shared_types::{DeviceStatus, Severity, SystemClock};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    const THREAT: &str = r#"{"type":"THREAT_ALERT","payload":{"severity":"CRITICAL","anomaly_code":"PERIMETER_BREACH","device_id":"GATE_3","details":"Fence sensor tripped."}}"#;
    const DEVICE: &str = r#"{"type":"DEVICE_UPDATE","payload":{"device_id":"DEMO_DEVICE_A","status":"BLOCKED"}}"#;

    fn client(url: String, bus: Arc<InMemoryEventBus>) -> UplinkClient {
        let mut config = UplinkConfig::with_url(url);
        config.reconnect_delay_ms = 50;
        UplinkClient::new(config, bus, Arc::new(SystemClock::new()))
    }

    async fn next(sub: &mut Subscription) -> FeedEvent {
        tokio::time::timeout(Duration::from_secs(5), sub.recv())
            .await
            .expect("event within timeout")
            .expect("bus open")
    }

    #[tokio::test]
    async fn test_frames_are_decoded_and_published() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(THREAT.to_string().into())).await.unwrap();
            ws.send(Message::Text(r#"{"type":"HEARTBEAT","payload":{}}"#.to_string().into()))
                .await
                .unwrap();
            ws.send(Message::Text("not json".to_string().into())).await.unwrap();
            ws.send(Message::Text(DEVICE.to_string().into())).await.unwrap();
            ws.close(None).await.unwrap();
        });

        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let uplink = client(url, bus.clone());
        let task = tokio::spawn(async move { uplink.run().await });

        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Established));

        let FeedEvent::Inbound(InboundMessage::ThreatAlert(threat)) = next(&mut sub).await else {
            panic!("expected threat alert");
        };
        assert_eq!(threat.severity, Severity::Critical);
        assert_eq!(threat.device_id, "GATE_3");

        let FeedEvent::Inbound(InboundMessage::DeviceUpdate(update)) = next(&mut sub).await else {
            panic!("expected device update");
        };
        assert_eq!(update.status, DeviceStatus::Blocked);

        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Lost));

        server.await.unwrap();
        task.abort();
    }

    #[tokio::test]
    async fn test_reconnects_after_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            for _ in 0..2 {
                let (stream, _) = listener.accept().await.unwrap();
                let mut ws = accept_async(stream).await.unwrap();
                ws.close(None).await.unwrap();
            }
        });

        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let uplink = client(url, bus.clone());
        let task = tokio::spawn(async move { uplink.run().await });

        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Established));
        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Lost));
        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Established));

        server.await.unwrap();
        task.abort();
    }

    #[tokio::test]
    async fn test_gives_up_after_attempt_cap() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());
        drop(listener);

        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let mut config = UplinkConfig::with_url(url);
        config.reconnect_delay_ms = 10;
        config.max_attempts = Some(3);
        let uplink = UplinkClient::new(config, bus.clone(), Arc::new(SystemClock::new()));

        let reason = tokio::time::timeout(Duration::from_secs(5), uplink.connection_loop())
            .await
            .expect("loop ends");
        assert!(matches!(reason, TransportError::AttemptsExhausted(3)));

        for _ in 0..3 {
            assert_eq!(sub.try_recv().unwrap(), Some(FeedEvent::Connection(ConnectionState::Lost)));
        }
    }

    #[tokio::test]
    async fn test_successful_open_resets_attempt_count() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let mut config = UplinkConfig::with_url(format!("ws://{addr}/ws"));
        config.reconnect_delay_ms = 200;
        config.max_attempts = Some(2);
        let uplink = UplinkClient::new(config, bus.clone(), Arc::new(SystemClock::new()));
        let task = tokio::spawn(async move { uplink.connection_loop().await });

        // First connect fails while nothing listens.
        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Lost));

        // One good session, then the port goes dark again.
        let listener = TcpListener::bind(addr).await.unwrap();
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.close(None).await.unwrap();
        });

        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Established));
        assert_eq!(next(&mut sub).await, FeedEvent::Connection(ConnectionState::Lost));
        server.await.unwrap();

        let reason = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("loop ends")
            .unwrap();
        assert!(matches!(reason, TransportError::AttemptsExhausted(2)));

        // Two fresh failures were needed after the session, not one.
        for _ in 0..2 {
            assert_eq!(sub.try_recv().unwrap(), Some(FeedEvent::Connection(ConnectionState::Lost)));
        }
        assert_eq!(sub.try_recv().unwrap(), None);
    }
}
