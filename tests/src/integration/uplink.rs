//! # Uplink Integration
//!
//! A local WebSocket backend pushes messages; the runtime's uplink decodes
//! them and the dashboard applies them exactly like the demo feed's alert.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_tungstenite::{accept_async, tungstenite::Message};

    use dashboard_runtime::dashboard::DEMO_DEVICE;
    use dashboard_runtime::{DashboardConfig, DashboardRuntime, DashboardSnapshot};
    use shared_types::{ConnectionState, DeviceStatus, LogCategory, SystemClock, ThreadRandom};
    use sn_02_event_feed::UplinkConfig;

    const CRITICAL: &str = r#"{"type":"THREAT_ALERT","payload":{"severity":"CRITICAL","anomaly_code":"PERIMETER_BREACH","device_id":"GATE_3","details":"Fence sensor tripped."}}"#;
    const BLOCK_DEVICE: &str = r#"{"type":"DEVICE_UPDATE","payload":{"device_id":"DEMO_DEVICE_A","status":"BLOCKED"}}"#;

    fn runtime(url: String) -> DashboardRuntime {
        let mut uplink = UplinkConfig::with_url(url);
        uplink.reconnect_delay_ms = 100;
        let config = DashboardConfig {
            uplink,
            ..DashboardConfig::default()
        };
        DashboardRuntime::with_sources(config, Arc::new(SystemClock::new()), Arc::new(ThreadRandom))
    }

    /// Poll the dashboard until `check` holds or five seconds pass.
    async fn wait_for(rt: &DashboardRuntime, check: impl Fn(&DashboardSnapshot) -> bool) -> DashboardSnapshot {
        for _ in 0..100 {
            let snap = rt.snapshot();
            if check(&snap) {
                return snap;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("dashboard never reached the expected state");
    }

    #[tokio::test]
    async fn test_pushed_messages_reach_dashboard() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());
        let (close_tx, close_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(CRITICAL.to_string().into())).await.unwrap();
            ws.send(Message::Text(r#"{"type":"PING_STATS","payload":{}}"#.to_string().into()))
                .await
                .unwrap();
            ws.send(Message::Text("{broken".to_string().into())).await.unwrap();
            ws.send(Message::Text(BLOCK_DEVICE.to_string().into())).await.unwrap();
            let _ = close_rx.await;
            ws.close(None).await.unwrap();
        });

        let mut rt = runtime(url);
        rt.start_feed();

        let snap = wait_for(&rt, |s| s.devices.get(DEMO_DEVICE) == Some(&DeviceStatus::Blocked)).await;
        assert_eq!(snap.connection, ConnectionState::Established);
        assert_eq!(snap.alerts.len(), 1);
        assert_eq!(snap.alerts[0].anomaly_code, "PERIMETER_BREACH");
        let threat_line = snap
            .log
            .iter()
            .find(|e| e.message == "⚠️ PERIMETER_BREACH detected on GATE_3")
            .expect("threat logged");
        assert_eq!(threat_line.category, LogCategory::Danger);

        close_tx.send(()).unwrap();
        let snap = wait_for(&rt, |s| s.connection == ConnectionState::Lost).await;
        assert_eq!(snap.connection.label(), "CONNECTION LOST");

        server.await.unwrap();
        rt.shutdown().await;
    }

    #[tokio::test]
    async fn test_uplink_replaces_demo_threat() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());

        let mut config = DashboardConfig::default();
        config.uplink = UplinkConfig::with_url(url);
        config.feed.demo_threat_delay_ms = 50;
        let mut rt =
            DashboardRuntime::with_sources(config, Arc::new(SystemClock::new()), Arc::new(ThreadRandom));
        rt.start_feed();

        let (stream, _) = listener.accept().await.unwrap();
        let _ws = accept_async(stream).await.unwrap();

        wait_for(&rt, |s| s.connection == ConnectionState::Established).await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rt.snapshot().alerts.is_empty());

        rt.shutdown().await;
    }
}
