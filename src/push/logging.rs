//! Push sender that records deliveries in the log instead of sending them.

use async_trait::async_trait;

use super::{PushError, PushMessage, PushSender};
use crate::domain::PushSubscription;

/// [`PushSender`] that logs the would-be delivery at `info` and succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPushSender;

#[async_trait]
impl PushSender for LoggingPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        title: &str,
        body: &str,
    ) -> Result<(), PushError> {
        let payload = PushMessage::new(title, body).to_payload();
        tracing::info!(
            endpoint = %subscription.endpoint,
            title,
            body,
            payload_bytes = payload.len(),
            "push notification (logged, not sent)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PushKeys;

    #[tokio::test]
    async fn always_succeeds() {
        let subscription = PushSubscription {
            endpoint: "https://push.example.com/abc".to_string(),
            expiration_time: Some(1_700_000_000_000),
            keys: PushKeys {
                p256dh: "key".to_string(),
                auth: "secret".to_string(),
            },
        };
        let result = LoggingPushSender
            .send(&subscription, "New Star!", "body")
            .await;
        assert!(result.is_ok());
    }
}
