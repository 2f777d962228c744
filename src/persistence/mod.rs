//! Persistence layer: durable storage of named shot sequences.
//!
//! [`SequenceStore`] is the single storage seam. The backend is chosen once
//! at startup by [`open_store`]:
//!
//! - [`PostgresStore`] when `DATABASE_URL` is set,
//! - [`SqliteStore`] under `DATA_DIR` otherwise,
//! - [`MemoryStore`] for tests and `STORAGE_BACKEND=memory`.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use models::{NewSequence, SequencePatch};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::{Sequence, SequenceId, SequenceSummary};
use crate::error::ApiError;

/// Create/read/update/delete over named sequences.
///
/// Full reads derive `total_shots` from the stored shots. Listings read the
/// stored `total_shots` column, which every write sets from the shot list.
/// Errors are reported as [`ApiError::PersistenceError`].
#[async_trait]
pub trait SequenceStore: Send + Sync + fmt::Debug {
    /// Short backend name reported by the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Creates the schema if it does not exist.
    async fn init(&self) -> Result<(), ApiError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), ApiError>;

    /// Inserts a sequence and returns its fresh ID.
    async fn create(&self, new: NewSequence) -> Result<SequenceId, ApiError>;

    /// Loads one sequence.
    async fn get(&self, id: SequenceId) -> Result<Option<Sequence>, ApiError>;

    /// Lists summaries, newest first.
    async fn list(&self) -> Result<Vec<SequenceSummary>, ApiError>;

    /// Applies a partial update. Returns `false` if the ID is unknown.
    async fn update(&self, id: SequenceId, patch: SequencePatch) -> Result<bool, ApiError>;

    /// Removes a sequence. Returns `false` if the ID is unknown.
    async fn delete(&self, id: SequenceId) -> Result<bool, ApiError>;
}

/// Opens the configured backend and bootstraps its schema.
///
/// # Errors
///
/// Returns [`ApiError::PersistenceError`] if the database cannot be
/// reached or the schema cannot be created.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn SequenceStore>, ApiError> {
    let store: Arc<dyn SequenceStore> = match &config.backend {
        StorageBackend::Postgres { url } => Arc::new(PostgresStore::connect(url, config).await?),
        StorageBackend::Sqlite { path } => Arc::new(SqliteStore::open(path, config).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    store.init().await?;
    tracing::info!(backend = store.backend_name(), "sequence store ready");
    Ok(store)
}

pub(crate) fn persistence_error(e: impl fmt::Display) -> ApiError {
    ApiError::PersistenceError(e.to_string())
}
