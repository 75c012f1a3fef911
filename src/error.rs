//! Service error types with HTTP status code mapping.
//!
//! [`PulseError`] is the central error type of the server. Each variant maps
//! to an HTTP status code and is rendered as the uniform failure envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Failure envelope returned by every endpoint.
///
/// ```json
/// { "success": false, "error": "Missing required settings fields." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Category              | Variants                                   | HTTP Status      |
/// |-----------------------|--------------------------------------------|------------------|
/// | Client input          | `InvalidRequest`                           | 400              |
/// | Not found             | `UserNotFound`                             | 404              |
/// | Upstream dependency   | `Upstream`                                 | forwarded        |
/// | Upstream unreachable  | `UpstreamUnavailable`, `PushDelivery`      | 502              |
/// | Server                | `Persistence`, `Internal`                  | 500              |
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// No settings record exists for the given user id.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// GitHub answered with a non-success status.
    #[error("github responded with {status}")]
    Upstream {
        /// Status returned by GitHub, forwarded to the caller.
        status: StatusCode,
    },

    /// GitHub could not be reached or returned an unreadable body.
    #[error("github request failed: {0}")]
    UpstreamUnavailable(String),

    /// The push transport rejected the notification.
    #[error("push delivery failed: {0}")]
    PushDelivery(String),

    /// Storage layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PulseError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status } => *status,
            Self::UpstreamUnavailable(_) | Self::PushDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown to API clients.
    ///
    /// Dependency and server failures get a fixed message; details only go
    /// to the log.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::UserNotFound(_) => "User not found".to_string(),
            Self::Upstream { .. } => "Failed to fetch repositories from GitHub.".to_string(),
            Self::UpstreamUnavailable(_) => "Failed to reach GitHub.".to_string(),
            Self::PushDelivery(_) => "Failed to deliver push notification.".to_string(),
            Self::Persistence(_) => "Storage failure.".to_string(),
            Self::Internal(_) => "Internal server error.".to_string(),
        }
    }
}

impl From<JsonRejection> for PulseError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<sqlx::Error> for PulseError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for PulseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: self.client_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn render(err: PulseError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let Ok(json) = serde_json::from_slice(&bytes) else {
            panic!("body should be JSON");
        };
        (status, json)
    }

    #[tokio::test]
    async fn invalid_request_is_400_with_message() {
        let (status, body) =
            render(PulseError::InvalidRequest("GitHub token is required.".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "GitHub token is required.");
    }

    #[tokio::test]
    async fn upstream_status_is_forwarded() {
        let (status, body) = render(PulseError::Upstream {
            status: StatusCode::UNAUTHORIZED,
        })
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch repositories from GitHub.");
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) =
            render(PulseError::Persistence("connection refused at 10.0.0.3".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Storage failure.");
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            PulseError::UserNotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn push_failure_is_bad_gateway() {
        assert_eq!(
            PulseError::PushDelivery("410 Gone".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
