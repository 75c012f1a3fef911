//! GitHub webhook receiver.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::HeaderMap;
use axum::routing::post;

use super::parse_user_id;
use crate::api::dto::{ApiResponse, WebhookReceipt};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PulseError};

/// Header carrying the GitHub event type.
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying GitHub's per-delivery GUID.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Largest payload GitHub sends (25 MB).
pub const MAX_WEBHOOK_BODY: usize = 25 * 1024 * 1024;

/// `POST /api/webhook/{userId}` — Receive a GitHub delivery.
///
/// Answers 200 whether or not the delivery produced an event.
///
/// # Errors
///
/// Returns [`PulseError::UserNotFound`] for unknown users.
#[utoipa::path(
    post,
    path = "/api/webhook/{userId}",
    tag = "Webhook",
    summary = "Receive GitHub webhook",
    description = "Maps star, watch, fork and follow deliveries to notifications. Other event types and malformed payloads are acknowledged and ignored.",
    params(
        ("userId" = String, Path, description = "User id returned by setup"),
        ("X-GitHub-Event" = Option<String>, Header, description = "GitHub event type"),
    ),
    request_body(content = serde_json::Value, description = "Raw GitHub event payload"),
    responses(
        (status = 200, description = "Delivery acknowledged", body = ApiResponse<WebhookReceipt>),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiResponse<WebhookReceipt>, PulseError> {
    let user_id = parse_user_id(&user_id)?;
    let event_type = headers.get(EVENT_HEADER).and_then(|v| v.to_str().ok());
    let delivery = headers
        .get(DELIVERY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info!(%user_id, event = event_type.unwrap_or("-"), delivery, "webhook received");

    state
        .service
        .handle_delivery(user_id, event_type, &body)
        .await?;

    Ok(ApiResponse::ok(WebhookReceipt::default()))
}

/// Webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/webhook/{user_id}",
        post(receive_webhook).layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY)),
    )
}
