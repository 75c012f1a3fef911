//! GitHub proxy DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /api/github/repos`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListReposRequest {
    /// GitHub personal access token. Used once, never stored.
    #[serde(default)]
    pub token: Option<String>,
}
