//! REST endpoint handlers organized by resource.

pub mod events;
pub mod github;
pub mod settings;
pub mod system;
pub mod webhook;

use axum::Router;

use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::PulseError;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(settings::routes())
        .merge(github::routes())
        .merge(events::routes())
        .merge(webhook::routes())
}

/// Parses a user id path segment.
///
/// A segment that is not a UUID cannot name a stored record, so it is
/// reported as not found rather than as a validation error.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, PulseError> {
    raw.parse()
        .map_err(|_| PulseError::UserNotFound(raw.to_string()))
}
