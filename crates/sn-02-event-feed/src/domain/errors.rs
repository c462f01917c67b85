//! Error types for the uplink transport

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failures that end a single uplink connection.
///
/// None of these are fatal to the feed: the connection loop reports the
/// loss and reconnects after the fixed delay.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("websocket error: {0}")]
    Socket(#[from] tungstenite::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error("gave up after {0} failed connection attempts")]
    AttemptsExhausted(u32),
}
