//! WebSocket message envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::GitHubEvent;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Server-generated message id.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// A newly recorded event.
    Event,
    /// Events were skipped because the connection fell behind.
    Lagged,
}

impl WsMessage {
    /// Wraps a recorded event.
    #[must_use]
    pub fn event(event: &GitHubEvent) -> Self {
        Self::new(
            WsMessageType::Event,
            serde_json::to_value(event).unwrap_or_default(),
        )
    }

    /// Reports `skipped` events dropped for this connection.
    #[must_use]
    pub fn lagged(skipped: u64) -> Self {
        Self::new(
            WsMessageType::Lagged,
            serde_json::json!({ "skipped": skipped }),
        )
    }

    fn new(msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Serializes the envelope to JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
