//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::api::handlers::parse_user_id;
use crate::app_state::AppState;
use crate::error::PulseError;

/// `GET /api/events/{userId}/ws` — Upgrade to the live event stream.
///
/// # Errors
///
/// Returns [`PulseError::UserNotFound`] before upgrading if the user is
/// unknown.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, PulseError> {
    let user_id = parse_user_id(&user_id)?;
    if !state.service.user_exists(user_id).await? {
        return Err(PulseError::UserNotFound(user_id.to_string()));
    }

    let event_rx = state.event_bus.subscribe();
    Ok(ws.on_upgrade(move |socket| run_connection(socket, user_id, event_rx)))
}
