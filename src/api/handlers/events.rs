//! Event list handler polled by the client.

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;

use super::parse_user_id;
use crate::api::dto::ApiResponse;
use crate::app_state::AppState;
use crate::domain::GitHubEvent;
use crate::error::{ErrorResponse, PulseError};
use crate::ws::handler::ws_handler;

/// `GET /api/events/{userId}` — Recorded events, newest first.
///
/// # Errors
///
/// Returns [`PulseError::UserNotFound`] for unknown users.
#[utoipa::path(
    get,
    path = "/api/events/{userId}",
    tag = "Events",
    summary = "List events",
    description = "Returns every event recorded for the user, newest first. No pagination.",
    params(
        ("userId" = String, Path, description = "User id returned by setup"),
    ),
    responses(
        (status = 200, description = "Event list", body = ApiResponse<Vec<GitHubEvent>>),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<GitHubEvent>>, PulseError> {
    let user_id = parse_user_id(&user_id)?;
    let events = state.service.events(user_id).await?;
    Ok(ApiResponse::ok(events))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/{user_id}", get(list_events))
        .route("/events/{user_id}/ws", get(ws_handler))
}
