//! Shared DTO types used across multiple endpoints.

use axum::Json;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::PulseError;

/// Success envelope wrapping every response payload.
///
/// ```json
/// { "success": true, "data": { "userId": "…" } }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Endpoint-specific payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a success envelope.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// JSON body extractor whose rejections use the failure envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(PulseError))]
pub struct ApiJson<T>(pub T);
