//! Minimal GitHub REST client: lists the repositories of a token's owner.
//!
//! The token is used for a single call and never stored.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::GitHubConfig;
use crate::error::PulseError;

/// A repository as offered to the user during setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GitHubRepo {
    /// Numeric GitHub repository id.
    pub id: u64,
    /// Full name, e.g. `"octocat/hello-world"`.
    pub full_name: String,
}

/// HTTP client for the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Creates a client with the given settings and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Internal`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: GitHubConfig, timeout: Duration) -> Result<Self, PulseError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PulseError::Internal(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Lists the repositories visible to `token`, most recently updated
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Upstream`] carrying GitHub's status when it
    /// answers with a non-success code, and
    /// [`PulseError::UpstreamUnavailable`] when the request fails or the
    /// response body cannot be decoded.
    pub async fn list_repos(&self, token: &str) -> Result<Vec<GitHubRepo>, PulseError> {
        let url = format!(
            "{}/user/repos?sort=updated&per_page={}",
            self.config.api_url, self.config.repos_per_page
        );

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| PulseError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "github repository listing rejected");
            return Err(PulseError::Upstream { status });
        }

        let repos: Vec<GitHubRepo> = response
            .json()
            .await
            .map_err(|e| PulseError::UpstreamUnavailable(e.to_string()))?;

        tracing::debug!(count = repos.len(), "fetched github repositories");
        Ok(repos)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;

    async fn spawn_github(app: Router) -> GitHubClient {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let config = GitHubConfig {
            api_url: format!("http://{addr}"),
            ..GitHubConfig::default()
        };
        let Ok(client) = GitHubClient::new(config, Duration::from_secs(5)) else {
            panic!("client build failed");
        };
        client
    }

    #[tokio::test]
    async fn maps_repositories_and_sends_credentials() {
        let app = Router::new().route(
            "/user/repos",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let agent = headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if auth != "Bearer ghp_valid" || agent != "OctoPulse-App" {
                    return (StatusCode::UNAUTHORIZED, axum::Json(serde_json::json!({})));
                }
                (
                    StatusCode::OK,
                    axum::Json(serde_json::json!([
                        { "id": 1, "full_name": "octocat/hello-world", "private": false },
                        { "id": 2, "full_name": "octocat/spoon-knife", "fork": true }
                    ])),
                )
            }),
        );
        let client = spawn_github(app).await;

        let Ok(repos) = client.list_repos("ghp_valid").await else {
            panic!("listing should succeed");
        };
        assert_eq!(
            repos,
            vec![
                GitHubRepo {
                    id: 1,
                    full_name: "octocat/hello-world".to_string()
                },
                GitHubRepo {
                    id: 2,
                    full_name: "octocat/spoon-knife".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn forwards_upstream_status() {
        let app = Router::new().route(
            "/user/repos",
            get(|| async { (StatusCode::UNAUTHORIZED, "Bad credentials") }),
        );
        let client = spawn_github(app).await;

        let result = client.list_repos("ghp_revoked").await;
        let Err(PulseError::Upstream { status }) = &result else {
            panic!("expected upstream error, got {result:?}");
        };
        assert_eq!(*status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn undecodable_body_is_unavailable() {
        let app = Router::new().route("/user/repos", get(|| async { "<html>maintenance</html>" }));
        let client = spawn_github(app).await;

        assert!(matches!(
            client.list_repos("ghp_valid").await,
            Err(PulseError::UpstreamUnavailable(_))
        ));
    }
}
