//! PostgreSQL implementation of the settings store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::SettingsStore;
use crate::config::DatabaseConfig;
use crate::domain::{EventKind, GitHubEvent, PushSubscription, UserId, UserSettings};
use crate::error::PulseError;

/// Raw `github_events` row: id, event type, title, body, creation time.
type EventRow = (Uuid, String, String, String, DateTime<Utc>);

/// PostgreSQL-backed [`SettingsStore`] using `sqlx::PgPool`.
///
/// Events are ordered by their insertion sequence, so two events stamped
/// with the same timestamp still come back newest first.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Persistence`] if the database is unreachable
    /// or a migration fails.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PulseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PulseError::Persistence(e.to_string()))?;

        tracing::info!(
            max_connections = config.max_connections,
            "postgres settings store ready"
        );
        Ok(Self::new(pool))
    }

    async fn insert_event(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        event: &GitHubEvent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO github_events (id, user_id, event_type, title, body, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.id)
        .bind(Uuid::from(user_id))
        .bind(event.kind.as_str())
        .bind(&event.title)
        .bind(&event.body)
        .bind(event.timestamp)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Converts a `github_events` row into a domain event.
fn event_from_row(
    (id, event_type, title, body, created_at): EventRow,
) -> Result<GitHubEvent, PulseError> {
    let kind = event_type.parse::<EventKind>().map_err(PulseError::Persistence)?;
    Ok(GitHubEvent {
        id,
        kind,
        title,
        body,
        timestamp: created_at,
    })
}

#[async_trait]
impl SettingsStore for PostgresStore {
    async fn create(&self, settings: UserSettings) -> Result<UserId, PulseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO user_settings (id, selected_repo, subscription) VALUES ($1, $2, $3)",
        )
        .bind(Uuid::from(settings.id))
        .bind(&settings.selected_repo)
        .bind(Json(&settings.subscription))
        .execute(&mut *tx)
        .await?;

        // Oldest first so the sequence order matches the list order.
        for event in settings.events.iter().rev() {
            Self::insert_event(&mut tx, settings.id, event).await?;
        }

        tx.commit().await?;
        Ok(settings.id)
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, PulseError> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM user_settings WHERE id = $1)",
        )
        .bind(Uuid::from(user_id))
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn get(&self, user_id: UserId) -> Result<UserSettings, PulseError> {
        let row = sqlx::query_as::<_, (String, Json<PushSubscription>)>(
            "SELECT selected_repo, subscription FROM user_settings WHERE id = $1",
        )
        .bind(Uuid::from(user_id))
        .fetch_optional(&self.pool)
        .await?;

        let Some((selected_repo, Json(subscription))) = row else {
            return Err(PulseError::UserNotFound(user_id.to_string()));
        };

        Ok(UserSettings {
            id: user_id,
            selected_repo,
            subscription,
            events: self.events(user_id).await?,
        })
    }

    async fn subscription(&self, user_id: UserId) -> Result<PushSubscription, PulseError> {
        let row = sqlx::query_scalar::<_, Json<PushSubscription>>(
            "SELECT subscription FROM user_settings WHERE id = $1",
        )
        .bind(Uuid::from(user_id))
        .fetch_optional(&self.pool)
        .await?;

        let Some(Json(subscription)) = row else {
            return Err(PulseError::UserNotFound(user_id.to_string()));
        };
        Ok(subscription)
    }

    async fn events(&self, user_id: UserId) -> Result<Vec<GitHubEvent>, PulseError> {
        if !self.exists(user_id).await? {
            return Err(PulseError::UserNotFound(user_id.to_string()));
        }

        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, event_type, title, body, created_at FROM github_events \
             WHERE user_id = $1 ORDER BY seq DESC",
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(event_from_row).collect()
    }

    async fn append_event(&self, user_id: UserId, event: GitHubEvent) -> Result<(), PulseError> {
        let mut tx = self.pool.begin().await?;
        match Self::insert_event(&mut tx, user_id, &event).await {
            Ok(()) => {}
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                return Err(PulseError::UserNotFound(user_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_to_event() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let row = (
            id,
            "follower".to_string(),
            "New Fork!".to_string(),
            "@hubot forked your repository octocat/hello-world.".to_string(),
            now,
        );
        let Ok(event) = event_from_row(row) else {
            panic!("row should map");
        };
        assert_eq!(event.id, id);
        assert_eq!(event.kind, EventKind::Follower);
        assert_eq!(event.timestamp, now);
    }

    #[test]
    fn unknown_event_type_is_a_persistence_error() {
        let row = (
            Uuid::new_v4(),
            "issue".to_string(),
            String::new(),
            String::new(),
            Utc::now(),
        );
        assert!(matches!(event_from_row(row), Err(PulseError::Persistence(_))));
    }
}
