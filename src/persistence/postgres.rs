//! PostgreSQL implementation of the sequence store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use super::{NewSequence, SequencePatch, SequenceStore, persistence_error};
use crate::config::StorageConfig;
use crate::domain::{Sequence, SequenceId, SequenceSettings, SequenceSummary, Shot};
use crate::error::ApiError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sequences (\
    id UUID PRIMARY KEY, \
    name TEXT NOT NULL, \
    shots JSONB NOT NULL, \
    settings JSONB, \
    total_shots INTEGER NOT NULL, \
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW())";

const CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS sequences_created_at_idx ON sequences (created_at DESC)";

type SequenceRow = (
    Uuid,
    String,
    Json<Vec<Shot>>,
    Option<Json<SequenceSettings>>,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] if no connection can be
    /// established within the configured timeout.
    pub async fn connect(url: &str, config: &StorageConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect(url)
            .await
            .map_err(persistence_error)?;
        tracing::info!(
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self::new(pool))
    }
}

fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[async_trait]
impl SequenceStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn init(&self) -> Result<(), ApiError> {
        for statement in [SCHEMA, CREATED_AT_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(persistence_error)?;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;
        Ok(())
    }

    async fn create(&self, new: NewSequence) -> Result<SequenceId, ApiError> {
        let id = SequenceId::new();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO sequences (id, name, shots, settings, total_shots, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(*id.as_uuid())
        .bind(&new.name)
        .bind(Json(&new.shots))
        .bind(new.settings.map(Json))
        .bind(count(new.shots.len()))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        tracing::debug!(%id, "inserted sequence row");
        Ok(id)
    }

    async fn get(&self, id: SequenceId) -> Result<Option<Sequence>, ApiError> {
        let row = sqlx::query_as::<_, SequenceRow>(
            "SELECT id, name, shots, settings, created_at, updated_at \
             FROM sequences WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(row.map(
            |(id, name, Json(shots), settings, created_at, updated_at)| {
                Sequence::from_parts(
                    SequenceId::from_uuid(id),
                    name,
                    shots,
                    settings.map(|Json(s)| s),
                    created_at,
                    updated_at,
                )
            },
        ))
    }

    async fn list(&self) -> Result<Vec<SequenceSummary>, ApiError> {
        let rows = sqlx::query_as::<_, (Uuid, String, i32, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT id, name, total_shots, created_at, updated_at \
             FROM sequences ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name, total, created_at, updated_at)| SequenceSummary {
                id: SequenceId::from_uuid(id),
                name,
                total_shots: usize::try_from(total).unwrap_or_default(),
                created_at,
                updated_at,
            })
            .collect())
    }

    async fn update(&self, id: SequenceId, patch: SequencePatch) -> Result<bool, ApiError> {
        let total = patch.shots.as_ref().map(|s| count(s.len()));
        let result = sqlx::query(
            "UPDATE sequences SET \
                name = COALESCE($2, name), \
                shots = COALESCE($3, shots), \
                settings = COALESCE($4, settings), \
                total_shots = COALESCE($5, total_shots), \
                updated_at = $6 \
             WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .bind(patch.name)
        .bind(patch.shots.map(Json))
        .bind(patch.settings.map(Json))
        .bind(total)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: SequenceId) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM sequences WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn shot_counts_saturate() {
        assert_eq!(count(7), 7);
        assert_eq!(count(usize::MAX), i32::MAX);
    }

    #[tokio::test]
    async fn unreachable_database_is_persistence_error() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            max_connections: 1,
            connect_timeout: Duration::from_millis(200),
        };
        let result = PostgresStore::connect("postgres://nobody@127.0.0.1:9/none", &config).await;
        assert!(matches!(result, Err(ApiError::PersistenceError(_))));
    }
}
