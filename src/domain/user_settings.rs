//! Settings record and the browser push subscription it carries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GitHubEvent, UserId};

/// Encryption keys issued by the browser's push manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PushKeys {
    /// Client public key (P-256 ECDH, base64url).
    pub p256dh: String,
    /// Authentication secret (base64url).
    pub auth: String,
}

/// A browser `PushSubscription` serialized with `toJSON()`.
///
/// Opaque to this service: stored and handed to the push sender unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Expiration time in epoch milliseconds, `null` when it never expires.
    #[serde(default)]
    pub expiration_time: Option<i64>,
    /// Message encryption keys.
    pub keys: PushKeys,
}

/// Association between a user id, a monitored repository and a push
/// subscription, plus the notifications recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Server-generated identifier.
    pub id: UserId,
    /// Full name (`owner/name`) of the repository being monitored.
    pub selected_repo: String,
    /// Where notifications are pushed.
    pub subscription: PushSubscription,
    /// Recorded notifications, newest first.
    pub events: Vec<GitHubEvent>,
}

impl UserSettings {
    /// Creates a fresh record with a new id and no events.
    #[must_use]
    pub fn new(selected_repo: String, subscription: PushSubscription) -> Self {
        Self {
            id: UserId::new(),
            selected_repo,
            subscription,
            events: Vec::new(),
        }
    }

    /// Records an event at the head of the list.
    pub fn push_event(&mut self, event: GitHubEvent) {
        self.events.insert(0, event);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventKind;

    fn subscription() -> PushSubscription {
        PushSubscription {
            endpoint: "https://push.example.com/send/abc".to_string(),
            expiration_time: None,
            keys: PushKeys {
                p256dh: "BEl62iUYgUivxIkv69yViEuiBIa".to_string(),
                auth: "tBHItJI5svbpez7KI4CCXg".to_string(),
            },
        }
    }

    #[test]
    fn subscription_uses_browser_field_names() {
        let json = serde_json::json!({
            "endpoint": "https://push.example.com/send/abc",
            "expirationTime": null,
            "keys": { "p256dh": "BEl62iUYgUivxIkv69yViEuiBIa", "auth": "tBHItJI5svbpez7KI4CCXg" }
        });
        let Ok(parsed) = serde_json::from_value::<PushSubscription>(json.clone()) else {
            panic!("browser subscription JSON should decode");
        };
        assert_eq!(parsed, subscription());
        assert_eq!(serde_json::to_value(&parsed).ok(), Some(json));
    }

    #[test]
    fn new_settings_start_without_events() {
        let settings = UserSettings::new("octocat/hello-world".to_string(), subscription());
        assert!(settings.events.is_empty());
        assert_eq!(settings.selected_repo, "octocat/hello-world");
    }

    #[test]
    fn push_event_keeps_newest_first() {
        let mut settings = UserSettings::new("octocat/hello-world".to_string(), subscription());
        let first = GitHubEvent::new(EventKind::Star, "New Star!", "first");
        let second = GitHubEvent::new(EventKind::Follower, "New Follower!", "second");
        settings.push_event(first.clone());
        settings.push_event(second.clone());
        assert_eq!(settings.events, vec![second, first]);
    }
}
