//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{EventBus, UserId};
use crate::github::GitHubClient;
use crate::service::NotificationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notification service for all business logic.
    pub service: Arc<NotificationService>,
    /// GitHub API client used during setup.
    pub github: GitHubClient,
    /// Event bus for live-stream subscriptions.
    pub event_bus: EventBus,
    /// Externally visible origin used to build webhook URLs.
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Returns the webhook URL GitHub should call for `user_id`, when the
    /// public origin is known.
    #[must_use]
    pub fn webhook_url(&self, user_id: UserId) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{base}/api/webhook/{user_id}"))
    }
}
