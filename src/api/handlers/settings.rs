//! Setup handler: stores the monitored repository and push subscription.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::api::dto::{ApiJson, ApiResponse, SaveSettingsRequest, SettingsSaved};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PulseError};

/// `POST /api/settings` — Complete setup.
///
/// # Errors
///
/// Returns [`PulseError::InvalidRequest`] if either field is missing.
#[utoipa::path(
    post,
    path = "/api/settings",
    tag = "Setup",
    summary = "Save settings",
    description = "Stores the repository to monitor and the browser push subscription, and returns the generated user id that identifies the webhook URL.",
    request_body = SaveSettingsRequest,
    responses(
        (status = 200, description = "Settings stored", body = ApiResponse<SettingsSaved>),
        (status = 400, description = "Missing required field", body = ErrorResponse),
    )
)]
pub async fn save_settings(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveSettingsRequest>,
) -> Result<ApiResponse<SettingsSaved>, PulseError> {
    let (Some(selected_repo), Some(subscription)) = (req.selected_repo, req.subscription) else {
        return Err(PulseError::InvalidRequest(
            "Missing required settings fields.".to_string(),
        ));
    };

    let user_id = state.service.register(selected_repo, subscription).await?;

    Ok(ApiResponse::ok(SettingsSaved {
        user_id,
        webhook_url: state.webhook_url(user_id),
    }))
}

/// Setup routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", post(save_settings))
}
