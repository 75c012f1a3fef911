//! Notification service: setup, event listing and webhook handling.

use std::sync::Arc;

use crate::domain::{
    EventBus, GitHubEvent, PushSubscription, RecordedEvent, UserId, UserSettings, WebhookPayload,
    dispatch,
};
use crate::error::PulseError;
use crate::push::PushSender;
use crate::store::SettingsStore;

/// Orchestration layer for all OctoPulse operations.
///
/// Holds no state of its own. A webhook delivery follows the pattern:
/// check user → decode → dispatch → append → publish → push.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<dyn SettingsStore>,
    push: Arc<dyn PushSender>,
    event_bus: EventBus,
}

impl NotificationService {
    /// Creates a new `NotificationService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn SettingsStore>,
        push: Arc<dyn PushSender>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            store,
            push,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the settings store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Stores a new settings record and returns the generated user id.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::InvalidRequest`] if the repository name is
    /// blank, or a storage error.
    pub async fn register(
        &self,
        selected_repo: String,
        subscription: PushSubscription,
    ) -> Result<UserId, PulseError> {
        if selected_repo.trim().is_empty() {
            return Err(PulseError::InvalidRequest(
                "Missing required settings fields.".to_string(),
            ));
        }

        let settings = UserSettings::new(selected_repo, subscription);
        let user_id = self.store.create(settings).await?;

        tracing::info!(%user_id, "saved settings");
        Ok(user_id)
    }

    /// Returns the user's events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] for unknown users, or a storage
    /// error.
    pub async fn events(&self, user_id: UserId) -> Result<Vec<GitHubEvent>, PulseError> {
        self.store.events(user_id).await
    }

    /// Returns `true` if a settings record exists for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn user_exists(&self, user_id: UserId) -> Result<bool, PulseError> {
        self.store.exists(user_id).await
    }

    /// Processes one webhook delivery.
    ///
    /// Returns the recorded event, or `None` when the delivery maps to no
    /// notification. Replayed deliveries are recorded again.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] for unknown users (nothing is
    /// created), [`PulseError::PushDelivery`] if the push transport fails
    /// after the event was recorded, or a storage error.
    pub async fn handle_delivery(
        &self,
        user_id: UserId,
        event_type: Option<&str>,
        body: &[u8],
    ) -> Result<Option<GitHubEvent>, PulseError> {
        if !self.store.exists(user_id).await? {
            tracing::warn!(%user_id, "webhook for unknown user");
            return Err(PulseError::UserNotFound(user_id.to_string()));
        }

        let event_type = event_type.unwrap_or_default();
        let payload = WebhookPayload::decode(body);
        let Some(notification) = dispatch(event_type, &payload) else {
            tracing::debug!(%user_id, event_type, "delivery produced no notification");
            return Ok(None);
        };

        let event = notification.into_event();
        self.store.append_event(user_id, event.clone()).await?;
        tracing::info!(%user_id, event_type, event_id = %event.id, "recorded event");

        // Live streams mirror the stored list whatever the push outcome.
        let _ = self.event_bus.publish(RecordedEvent {
            user_id,
            event: event.clone(),
        });

        let subscription = self.store.subscription(user_id).await?;
        self.push
            .send(&subscription, &event.title, &event.body)
            .await
            .map_err(|e| PulseError::PushDelivery(e.to_string()))?;

        Ok(Some(event))
    }
}
