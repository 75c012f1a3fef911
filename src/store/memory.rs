//! In-process settings store with per-record locking.
//!
//! Records live in a `HashMap` where each entry is individually protected by
//! a [`tokio::sync::RwLock`], so appends for different users never contend
//! and appends for the same user are serialized.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SettingsStore;
use crate::domain::{GitHubEvent, PushSubscription, UserId, UserSettings};
use crate::error::PulseError;

/// Memory-backed [`SettingsStore`]. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<UserId, Arc<RwLock<UserSettings>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn record(&self, user_id: UserId) -> Result<Arc<RwLock<UserSettings>>, PulseError> {
        let map = self.records.read().await;
        map.get(&user_id)
            .cloned()
            .ok_or_else(|| PulseError::UserNotFound(user_id.to_string()))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn create(&self, settings: UserSettings) -> Result<UserId, PulseError> {
        let user_id = settings.id;
        let mut map = self.records.write().await;
        if map.contains_key(&user_id) {
            return Err(PulseError::Persistence(format!(
                "settings {user_id} already exist"
            )));
        }
        map.insert(user_id, Arc::new(RwLock::new(settings)));
        Ok(user_id)
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, PulseError> {
        Ok(self.records.read().await.contains_key(&user_id))
    }

    async fn get(&self, user_id: UserId) -> Result<UserSettings, PulseError> {
        let record = self.record(user_id).await?;
        let settings = record.read().await;
        Ok(settings.clone())
    }

    async fn subscription(&self, user_id: UserId) -> Result<PushSubscription, PulseError> {
        let record = self.record(user_id).await?;
        let settings = record.read().await;
        Ok(settings.subscription.clone())
    }

    async fn events(&self, user_id: UserId) -> Result<Vec<GitHubEvent>, PulseError> {
        let record = self.record(user_id).await?;
        let settings = record.read().await;
        Ok(settings.events.clone())
    }

    async fn append_event(&self, user_id: UserId, event: GitHubEvent) -> Result<(), PulseError> {
        let record = self.record(user_id).await?;
        record.write().await.push_event(event);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventKind, PushKeys};

    fn make_settings() -> UserSettings {
        UserSettings::new(
            "octocat/hello-world".to_string(),
            PushSubscription {
                endpoint: "https://push.example.com/abc".to_string(),
                expiration_time: None,
                keys: PushKeys {
                    p256dh: "key".to_string(),
                    auth: "secret".to_string(),
                },
            },
        )
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryStore::new();
        let settings = make_settings();
        let Ok(id) = store.create(settings.clone()).await else {
            panic!("create failed");
        };
        assert_eq!(id, settings.id);

        let Ok(loaded) = store.get(id).await else {
            panic!("get failed");
        };
        assert_eq!(loaded, settings);

        let Ok(subscription) = store.subscription(id).await else {
            panic!("subscription failed");
        };
        assert_eq!(subscription, settings.subscription);
        assert!(matches!(store.exists(id).await, Ok(true)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let id = UserId::new();
        assert!(matches!(store.exists(id).await, Ok(false)));
        assert!(matches!(store.get(id).await, Err(PulseError::UserNotFound(_))));
        assert!(matches!(store.events(id).await, Err(PulseError::UserNotFound(_))));
        assert!(matches!(
            store.subscription(id).await,
            Err(PulseError::UserNotFound(_))
        ));

        let event = GitHubEvent::new(EventKind::Star, "New Star!", "body");
        assert!(matches!(
            store.append_event(id, event).await,
            Err(PulseError::UserNotFound(_))
        ));
        assert!(matches!(store.exists(id).await, Ok(false)));
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let store = MemoryStore::new();
        let settings = make_settings();
        let id = settings.id;
        assert!(store.create(settings.clone()).await.is_ok());
        assert!(matches!(
            store.create(settings).await,
            Err(PulseError::Persistence(_))
        ));
        assert!(matches!(store.exists(id).await, Ok(true)));
    }

    #[tokio::test]
    async fn events_are_newest_first() {
        let store = MemoryStore::new();
        let Ok(id) = store.create(make_settings()).await else {
            panic!("create failed");
        };
        let older = GitHubEvent::new(EventKind::Star, "New Star!", "older");
        let newer = GitHubEvent::new(EventKind::Follower, "New Follower!", "newer");
        assert!(store.append_event(id, older.clone()).await.is_ok());
        assert!(store.append_event(id, newer.clone()).await.is_ok());

        let Ok(events) = store.events(id).await else {
            panic!("events failed");
        };
        assert_eq!(events, vec![newer, older]);
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept() {
        let store = Arc::new(MemoryStore::new());
        let Ok(id) = store.create(make_settings()).await else {
            panic!("create failed");
        };

        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let event = GitHubEvent::new(EventKind::Star, "New Star!", format!("#{i}"));
                store.append_event(id, event).await
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(Ok(()))));
        }

        let Ok(events) = store.events(id).await else {
            panic!("events failed");
        };
        assert_eq!(events.len(), 50);
    }
}
