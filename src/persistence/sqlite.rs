//! SQLite implementation of the sequence store.
//!
//! Shots and settings are stored as JSON text; IDs as hyphenated UUID
//! text; timestamps as RFC 3339 text.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;

use super::{NewSequence, SequencePatch, SequenceStore, persistence_error};
use crate::config::StorageConfig;
use crate::domain::{Sequence, SequenceId, SequenceSettings, SequenceSummary, Shot};
use crate::error::ApiError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sequences (\
    id TEXT PRIMARY KEY, \
    name TEXT NOT NULL, \
    shots TEXT NOT NULL, \
    settings TEXT, \
    total_shots INTEGER NOT NULL, \
    created_at TEXT NOT NULL, \
    updated_at TEXT NOT NULL)";

type SequenceRow = (
    String,
    String,
    Json<Vec<Shot>>,
    Option<Json<SequenceSettings>>,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// SQLite-backed store using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] if the parent directory cannot
    /// be created or the database cannot be opened.
    pub async fn open(path: &Path, config: &StorageConfig) -> Result<Self, ApiError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(persistence_error)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await
            .map_err(persistence_error)?;
        tracing::info!(path = %path.display(), "opened sqlite database");
        Ok(Self::new(pool))
    }
}

fn parse_id(raw: &str) -> Result<SequenceId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::PersistenceError(format!("corrupt sequence id {raw:?}: {e}")))
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl SequenceStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn init(&self) -> Result<(), ApiError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;
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
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        )
        .bind(id.to_string())
        .bind(&new.name)
        .bind(Json(&new.shots))
        .bind(new.settings.map(Json))
        .bind(count(new.shots.len()))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(id)
    }

    async fn get(&self, id: SequenceId) -> Result<Option<Sequence>, ApiError> {
        let row = sqlx::query_as::<_, SequenceRow>(
            "SELECT id, name, shots, settings, created_at, updated_at \
             FROM sequences WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_error)?;

        row.map(|(raw_id, name, Json(shots), settings, created_at, updated_at)| {
            Ok(Sequence::from_parts(
                parse_id(&raw_id)?,
                name,
                shots,
                settings.map(|Json(s)| s),
                created_at,
                updated_at,
            ))
        })
        .transpose()
    }

    async fn list(&self) -> Result<Vec<SequenceSummary>, ApiError> {
        let rows = sqlx::query_as::<_, (String, String, i64, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT id, name, total_shots, created_at, updated_at \
             FROM sequences ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_error)?;

        rows.into_iter()
            .map(|(raw_id, name, total, created_at, updated_at)| {
                Ok(SequenceSummary {
                    id: parse_id(&raw_id)?,
                    name,
                    total_shots: usize::try_from(total).unwrap_or_default(),
                    created_at,
                    updated_at,
                })
            })
            .collect()
    }

    async fn update(&self, id: SequenceId, patch: SequencePatch) -> Result<bool, ApiError> {
        let total = patch.shots.as_ref().map(|s| count(s.len()));
        let result = sqlx::query(
            "UPDATE sequences SET \
                name = COALESCE(?2, name), \
                shots = COALESCE(?3, shots), \
                settings = COALESCE(?4, settings), \
                total_shots = COALESCE(?5, total_shots), \
                updated_at = ?6 \
             WHERE id = ?1",
        )
        .bind(id.to_string())
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
        let result = sqlx::query("DELETE FROM sequences WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{DepthPosition, HorizontalPosition, Space};

    async fn store() -> SqliteStore {
        let Ok(pool) = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
        else {
            panic!("in-memory sqlite should open");
        };
        let store = SqliteStore::new(pool);
        let Ok(()) = store.init().await else {
            panic!("schema should be created");
        };
        store
    }

    fn shots(n: usize) -> Vec<Shot> {
        (0..n)
            .map(|i| Shot::new(HorizontalPosition::CenterLeft, DepthPosition::MidBack, Space::for_position(i)))
            .collect()
    }

    fn new_sequence(name: &str, n: usize) -> NewSequence {
        NewSequence {
            name: name.to_string(),
            shots: shots(n),
            settings: Some(SequenceSettings {
                min_distance: Some(1.5),
                max_distance: Some(4.0),
            }),
        }
    }

    #[tokio::test]
    async fn round_trips_sequence() {
        let store = store().await;
        let Ok(id) = store.create(new_sequence("serve drill", 3)).await else {
            panic!("create should succeed");
        };
        let result = store.get(id).await;
        let Ok(Some(seq)) = result else {
            panic!("sequence should exist, got {result:?}");
        };
        assert_eq!(seq.id, id);
        assert_eq!(seq.shots, shots(3));
        assert_eq!(seq.metadata.total_shots, 3);
        assert_eq!(seq.settings.and_then(|s| s.max_distance), Some(4.0));
        assert!(seq.metadata.updated_at.is_none());
    }

    #[tokio::test]
    async fn list_newest_first_with_counts() {
        let store = store().await;
        let _ = store.create(new_sequence("older", 2)).await;
        let _ = store.create(new_sequence("newer", 5)).await;

        let Ok(list) = store.list().await else {
            panic!("list should succeed");
        };
        let view: Vec<(&str, usize)> = list.iter().map(|s| (s.name.as_str(), s.total_shots)).collect();
        assert_eq!(view, [("newer", 5), ("older", 2)]);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = store().await;
        let Ok(id) = store.create(new_sequence("drill", 2)).await else {
            panic!("create should succeed");
        };
        let patch = SequencePatch {
            name: Some("renamed".to_string()),
            ..SequencePatch::default()
        };
        assert!(matches!(store.update(id, patch).await, Ok(true)));

        let Ok(Some(seq)) = store.get(id).await else {
            panic!("sequence should exist");
        };
        assert_eq!(seq.name, "renamed");
        assert_eq!(seq.shots.len(), 2);
        assert!(seq.settings.is_some());
        assert!(seq.updated_at >= seq.created_at);

        let Ok(list) = store.list().await else {
            panic!("list should succeed");
        };
        assert_eq!(list.first().map(|s| s.total_shots), Some(2));
    }

    #[tokio::test]
    async fn update_shots_moves_total() {
        let store = store().await;
        let Ok(id) = store.create(new_sequence("drill", 2)).await else {
            panic!("create should succeed");
        };
        let patch = SequencePatch {
            shots: Some(shots(6)),
            ..SequencePatch::default()
        };
        assert!(matches!(store.update(id, patch).await, Ok(true)));
        let Ok(list) = store.list().await else {
            panic!("list should succeed");
        };
        assert_eq!(list.first().map(|s| s.total_shots), Some(6));
    }

    #[tokio::test]
    async fn missing_rows_report_false() {
        let store = store().await;
        let id = SequenceId::new();
        assert!(matches!(store.get(id).await, Ok(None)));
        assert!(matches!(store.update(id, SequencePatch::default()).await, Ok(false)));
        assert!(matches!(store.delete(id).await, Ok(false)));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = store().await;
        let Ok(id) = store.create(new_sequence("drill", 1)).await else {
            panic!("create should succeed");
        };
        assert!(matches!(store.delete(id).await, Ok(true)));
        assert!(matches!(store.get(id).await, Ok(None)));
        assert!(store.ping().await.is_ok());
    }
}
