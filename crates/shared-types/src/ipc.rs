//! # Inbound Message Shape
//!
//! Structured events pushed by a backend (or synthesized by the demo feed):
//!
//! ```json
//! { "type": "THREAT_ALERT", "payload": { "severity": "HIGH", ... } }
//! ```
//!
//! Known discriminators are `THREAT_ALERT` and `DEVICE_UPDATE`. Unknown
//! discriminators decode to `None` and are ignored by consumers.

use crate::entities::{DeviceUpdate, ThreatAlert};
use crate::errors::MessageError;
use serde::{Deserialize, Serialize};

/// Discriminator for threat alerts.
pub const THREAT_ALERT: &str = "THREAT_ALERT";
/// Discriminator for device status updates.
pub const DEVICE_UPDATE: &str = "DEVICE_UPDATE";

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundMessage {
    ThreatAlert(ThreatAlert),
    DeviceUpdate(DeviceUpdate),
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl InboundMessage {
    /// Decode a text frame.
    ///
    /// Returns `Ok(None)` for a well-formed message with an unknown `type`.
    pub fn parse(text: &str) -> Result<Option<Self>, MessageError> {
        let raw: RawMessage = serde_json::from_str(text).map_err(MessageError::Malformed)?;

        let decoded = match raw.kind.as_str() {
            THREAT_ALERT => serde_json::from_value(raw.payload).map(Self::ThreatAlert),
            DEVICE_UPDATE => serde_json::from_value(raw.payload).map(Self::DeviceUpdate),
            _ => return Ok(None),
        };

        decoded
            .map(Some)
            .map_err(|source| MessageError::InvalidPayload {
                kind: raw.kind,
                source,
            })
    }

    /// Encode to the wire shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The wire discriminator of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ThreatAlert(_) => THREAT_ALERT,
            Self::DeviceUpdate(_) => DEVICE_UPDATE,
        }
    }
}
