//! Typed HTTP client for the OctoPulse API.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ClientError, ClientState};
use crate::api::dto::SettingsSaved;
use crate::domain::{GitHubEvent, PushSubscription, UserId};
use crate::github::GitHubRepo;

#[derive(Deserialize)]
struct SuccessEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct FailureEnvelope {
    error: String,
}

/// Client for a running OctoPulse server.
#[derive(Debug, Clone)]
pub struct PulseClient {
    http: reqwest::Client,
    base_url: String,
}

impl PulseClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Webhook URL GitHub should call for `user_id`.
    #[must_use]
    pub fn webhook_url(&self, user_id: UserId) -> String {
        format!("{}/api/webhook/{user_id}", self.base_url)
    }

    /// Lists the repositories visible to a GitHub token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the server's status and message on
    /// failure, or [`ClientError::Http`] if the server is unreachable.
    pub async fn list_repos(&self, token: &str) -> Result<Vec<GitHubRepo>, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/github/repos", self.base_url))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;
        read_envelope(response).await
    }

    /// Stores the repository and push subscription on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on rejection, or [`ClientError::Http`]
    /// if the server is unreachable.
    pub async fn register(
        &self,
        selected_repo: &str,
        subscription: &PushSubscription,
    ) -> Result<SettingsSaved, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/settings", self.base_url))
            .json(&serde_json::json!({
                "selectedRepo": selected_repo,
                "subscription": subscription,
            }))
            .send()
            .await?;
        read_envelope(response).await
    }

    /// Fetches every recorded event for `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (404 for unknown users), or
    /// [`ClientError::Http`] if the server is unreachable.
    pub async fn fetch_events(&self, user_id: UserId) -> Result<Vec<GitHubEvent>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/events/{user_id}", self.base_url))
            .send()
            .await?;
        read_envelope(response).await
    }

    /// Registers with the server and records the outcome in `state`.
    ///
    /// `state` is left untouched if registration fails.
    ///
    /// # Errors
    ///
    /// Propagates [`PulseClient::register`] errors.
    pub async fn complete_setup(
        &self,
        state: &mut ClientState,
        selected_repo: &str,
        subscription: &PushSubscription,
    ) -> Result<UserId, ClientError> {
        let saved = self.register(selected_repo, subscription).await?;
        let webhook_url = saved
            .webhook_url
            .unwrap_or_else(|| self.webhook_url(saved.user_id));
        state.complete_setup(saved.user_id, selected_repo.to_string(), webhook_url);
        tracing::info!(user_id = %saved.user_id, "setup completed");
        Ok(saved.user_id)
    }

    /// Refreshes the cached events in `state` and returns how many there
    /// are.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConfigured`] without a user id, otherwise
    /// propagates [`PulseClient::fetch_events`] errors. The cache is kept
    /// on failure.
    pub async fn sync_events(&self, state: &mut ClientState) -> Result<usize, ClientError> {
        let user_id = state.user_id.ok_or(ClientError::NotConfigured)?;
        let events = self.fetch_events(user_id).await?;
        let count = events.len();
        state.replace_events(events);
        Ok(count)
    }
}

/// Unwraps a success envelope, or converts a failure envelope into
/// [`ClientError::Api`].
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<FailureEnvelope>(&bytes)
            .map(|f| f.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: SuccessEnvelope<T> = serde_json::from_slice(&bytes)?;
    Ok(envelope.data)
}
