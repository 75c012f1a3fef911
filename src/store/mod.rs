//! Settings/event store: create-once settings records with an append-only
//! event list.
//!
//! [`SettingsStore`] is the seam between the service layer and durable
//! storage. [`MemoryStore`] keeps records in process memory;
//! [`PostgresStore`] persists them with `sqlx`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{GitHubEvent, PushSubscription, UserId, UserSettings};
use crate::error::PulseError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage backend for settings records and their events.
///
/// There is no update or delete path for settings. Event lists are returned
/// in full, newest first.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug {
    /// Stores a new settings record and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Persistence`] on storage failure.
    async fn create(&self, settings: UserSettings) -> Result<UserId, PulseError>;

    /// Returns `true` if a record exists for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Persistence`] on storage failure.
    async fn exists(&self, user_id: UserId) -> Result<bool, PulseError>;

    /// Loads a full settings record, events included.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] if no record exists, or
    /// [`PulseError::Persistence`] on storage failure.
    async fn get(&self, user_id: UserId) -> Result<UserSettings, PulseError>;

    /// Returns the push subscription of a record without its events.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] if no record exists, or
    /// [`PulseError::Persistence`] on storage failure.
    async fn subscription(&self, user_id: UserId) -> Result<PushSubscription, PulseError>;

    /// Returns the recorded events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] if no record exists, or
    /// [`PulseError::Persistence`] on storage failure.
    async fn events(&self, user_id: UserId) -> Result<Vec<GitHubEvent>, PulseError>;

    /// Appends an event to the head of the user's list.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::UserNotFound`] if no record exists, or
    /// [`PulseError::Persistence`] on storage failure.
    async fn append_event(&self, user_id: UserId, event: GitHubEvent) -> Result<(), PulseError>;
}
