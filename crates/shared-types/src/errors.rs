//! # Error Types
//!
//! Errors raised while decoding inbound uplink messages.

use thiserror::Error;

/// Errors that can occur while parsing an inbound push message.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The frame is not a JSON object with a `type` discriminator.
    #[error("Malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The discriminator is known but the payload does not match its shape.
    #[error("Invalid {kind} payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
