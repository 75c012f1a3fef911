//! Push delivery seam.
//!
//! The service never talks to a push service directly: it hands a
//! subscription, title and body to a [`PushSender`]. The default
//! [`LoggingPushSender`] only records the attempt.

pub mod logging;
pub mod notification;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::PushSubscription;

pub use logging::LoggingPushSender;
pub use notification::DisplayedNotification;

/// Errors reported by a push transport.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The push service no longer accepts this subscription.
    #[error("subscription expired: {0}")]
    SubscriptionGone(String),
}

/// JSON document delivered to the browser's service worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Notification headline.
    pub title: String,
    /// Notification text.
    pub body: String,
}

impl PushMessage {
    /// Builds a message from borrowed parts.
    #[must_use]
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    /// Serializes the message as the push payload bytes.
    #[must_use]
    pub fn to_payload(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Outbound push transport.
#[async_trait]
pub trait PushSender: Send + Sync + std::fmt::Debug {
    /// Sends one notification to one subscription. No retries.
    ///
    /// # Errors
    ///
    /// Returns a [`PushError`] if the transport rejects the message.
    async fn send(
        &self,
        subscription: &PushSubscription,
        title: &str,
        body: &str,
    ) -> Result<(), PushError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_title_and_body_json() {
        let payload = PushMessage::new("New Star!", "from @hubot").to_payload();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({ "title": "New Star!", "body": "from @hubot" })
        );
    }
}
