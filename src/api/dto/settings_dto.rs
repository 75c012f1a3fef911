//! Setup DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PushSubscription, UserId};

/// Request body for `POST /api/settings`.
///
/// Both fields are optional at the decoding level so that a missing field
/// is reported with the failure envelope rather than a decoding error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    /// Full name of the repository to monitor.
    #[serde(default)]
    pub selected_repo: Option<String>,
    /// Browser push subscription.
    #[serde(default)]
    pub subscription: Option<PushSubscription>,
}

/// Response payload for `POST /api/settings`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSaved {
    /// Generated user id.
    pub user_id: UserId,
    /// Webhook URL to configure on GitHub, when the public origin is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}
