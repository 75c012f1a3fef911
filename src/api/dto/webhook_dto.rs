//! Webhook DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned for every accepted delivery.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookReceipt {
    /// Always `"Webhook received"`.
    pub message: String,
}

impl Default for WebhookReceipt {
    fn default() -> Self {
        Self {
            message: "Webhook received".to_string(),
        }
    }
}
