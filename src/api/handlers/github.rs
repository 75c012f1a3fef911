//! GitHub proxy handler used during setup.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::api::dto::{ApiJson, ApiResponse, ListReposRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PulseError};
use crate::github::GitHubRepo;

/// `POST /api/github/repos` — List the token owner's repositories.
///
/// # Errors
///
/// Returns [`PulseError::InvalidRequest`] without a token, and
/// [`PulseError::Upstream`] with GitHub's status when GitHub refuses.
#[utoipa::path(
    post,
    path = "/api/github/repos",
    tag = "Setup",
    summary = "List GitHub repositories",
    description = "Proxies GitHub's repository listing using the supplied personal access token. GitHub's status code is forwarded on failure.",
    request_body = ListReposRequest,
    responses(
        (status = 200, description = "Repositories, most recently updated first", body = ApiResponse<Vec<GitHubRepo>>),
        (status = 400, description = "Missing token", body = ErrorResponse),
        (status = 401, description = "GitHub rejected the token", body = ErrorResponse),
        (status = 502, description = "GitHub unreachable", body = ErrorResponse),
    )
)]
pub async fn list_repos(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ListReposRequest>,
) -> Result<ApiResponse<Vec<GitHubRepo>>, PulseError> {
    let Some(token) = req.token.filter(|t| !t.trim().is_empty()) else {
        return Err(PulseError::InvalidRequest(
            "GitHub token is required.".to_string(),
        ));
    };

    let repos = state.github.list_repos(token.trim()).await?;
    Ok(ApiResponse::ok(repos))
}

/// GitHub proxy routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/github/repos", post(list_repos))
}
