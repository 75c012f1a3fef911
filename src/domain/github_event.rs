//! Notification records produced from GitHub webhook deliveries.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Visual category of a notification.
///
/// Forks are reported as [`EventKind::Follower`] so that clients render
/// them with the follower icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A repository received a star.
    Star,
    /// The account gained a follower, or a repository was forked.
    Follower,
}

impl EventKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Follower => "follower",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "star" => Ok(Self::Star),
            "follower" => Ok(Self::Follower),
            other => Err(format!("unknown event kind: {other}")),
        }
    }
}

/// A recorded notification, immutable once created.
///
/// Owned by exactly one settings record; event lists are kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GitHubEvent {
    /// Unique event identifier (UUID v4).
    pub id: uuid::Uuid,
    /// Notification category.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Short headline, e.g. `"New Star!"`.
    pub title: String,
    /// Human-readable description.
    pub body: String,
    /// Server time at which the delivery was processed.
    pub timestamp: DateTime<Utc>,
}

impl GitHubEvent {
    /// Creates a new event stamped with a fresh id and the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision PostgreSQL
    /// keeps, so a stored event reads back identical.
    #[must_use]
    pub fn new(kind: EventKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            title: title.into(),
            body: body.into(),
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }
}
