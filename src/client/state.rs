//! Locally persisted client state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ClientError;
use crate::domain::{GitHubEvent, UserId};

/// Everything the client remembers between runs.
///
/// Serialized as camelCase JSON and round-tripped verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
    /// Whether setup has been completed.
    #[serde(default)]
    pub is_configured: bool,
    /// User id issued by the server.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Repository being monitored.
    #[serde(default)]
    pub selected_repo: Option<String>,
    /// Webhook URL to configure on GitHub.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Cached events, newest first.
    #[serde(default)]
    pub events: Vec<GitHubEvent>,
}

impl ClientState {
    /// Default location: `{data_dir}/octopulse/settings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("octopulse")
            .join("settings.json")
    }

    /// Loads state from `path`. A missing file yields the default state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read and
    /// [`ClientError::Json`] if it is not valid state JSON.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes state to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Records a completed setup.
    pub fn complete_setup(&mut self, user_id: UserId, selected_repo: String, webhook_url: String) {
        self.user_id = Some(user_id);
        self.selected_repo = Some(selected_repo);
        self.webhook_url = Some(webhook_url);
        self.is_configured = true;
    }

    /// Prepends an event to the cache.
    pub fn add_event(&mut self, event: GitHubEvent) {
        self.events.insert(0, event);
    }

    /// Replaces the cache with a freshly fetched list.
    pub fn replace_events(&mut self, events: Vec<GitHubEvent>) {
        self.events = events;
    }

    /// Returns to the setup screen. The user id is kept.
    pub fn reset(&mut self) {
        self.is_configured = false;
        self.selected_repo = None;
        self.webhook_url = None;
        self.events.clear();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventKind;

    fn configured() -> ClientState {
        let mut state = ClientState::default();
        let user_id = UserId::new();
        state.complete_setup(
            user_id,
            "octocat/hello-world".to_string(),
            format!("https://pulse.example.com/api/webhook/{user_id}"),
        );
        state.add_event(GitHubEvent::new(EventKind::Star, "New Star!", "first"));
        state
    }

    #[test]
    fn missing_file_loads_default() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let Ok(state) = ClientState::load(&dir.path().join("absent.json")) else {
            panic!("load failed");
        };
        assert_eq!(state, ClientState::default());
        assert!(!state.is_configured);
    }

    #[test]
    fn save_then_load_round_trips() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("nested").join("settings.json");
        let state = configured();
        assert!(state.save(&path).is_ok());

        let Ok(loaded) = ClientState::load(&path) else {
            panic!("load failed");
        };
        assert_eq!(loaded, state);
    }

    #[test]
    fn file_uses_camel_case_keys() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("settings.json");
        assert!(configured().save(&path).is_ok());

        let content = std::fs::read_to_string(&path).unwrap_or_default();
        for key in ["isConfigured", "userId", "selectedRepo", "webhookUrl", "events"] {
            assert!(content.contains(key), "missing {key}");
        }
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("settings.json");
        assert!(std::fs::write(&path, "{not json").is_ok());
        assert!(matches!(ClientState::load(&path), Err(ClientError::Json(_))));
    }

    #[test]
    fn add_event_prepends() {
        let mut state = configured();
        state.add_event(GitHubEvent::new(EventKind::Follower, "New Follower!", "second"));
        let bodies: Vec<&str> = state.events.iter().map(|e| e.body.as_str()).collect();
        assert_eq!(bodies, vec!["second", "first"]);
    }

    #[test]
    fn reset_keeps_user_id() {
        let mut state = configured();
        let user_id = state.user_id;
        state.reset();
        assert!(!state.is_configured);
        assert_eq!(state.user_id, user_id);
        assert!(state.selected_repo.is_none());
        assert!(state.webhook_url.is_none());
        assert!(state.events.is_empty());
    }
}
