//! Process-local sequence store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NewSequence, SequencePatch, SequenceStore};
use crate::domain::{Sequence, SequenceId, SequenceSummary};
use crate::error::ApiError;

/// In-memory store backed by a `RwLock<HashMap<...>>`.
///
/// Writes are serialised by the map lock. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    sequences: HashMap<SequenceId, Entry>,
    next_order: u64,
}

#[derive(Debug)]
struct Entry {
    sequence: Sequence,
    /// Insertion counter; breaks `created_at` ties in listings.
    order: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn init(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn create(&self, new: NewSequence) -> Result<SequenceId, ApiError> {
        let id = SequenceId::new();
        let now = Utc::now();
        let sequence = Sequence::from_parts(id, new.name, new.shots, new.settings, now, now);

        let mut inner = self.inner.write().await;
        let order = inner.next_order;
        inner.next_order = inner.next_order.saturating_add(1);
        inner.sequences.insert(id, Entry { sequence, order });
        Ok(id)
    }

    async fn get(&self, id: SequenceId) -> Result<Option<Sequence>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.sequences.get(&id).map(|e| e.sequence.clone()))
    }

    async fn list(&self) -> Result<Vec<SequenceSummary>, ApiError> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&Entry> = inner.sequences.values().collect();
        entries.sort_by(|a, b| {
            b.sequence
                .created_at
                .cmp(&a.sequence.created_at)
                .then(b.order.cmp(&a.order))
        });
        Ok(entries.into_iter().map(|e| e.sequence.summary()).collect())
    }

    async fn update(&self, id: SequenceId, patch: SequencePatch) -> Result<bool, ApiError> {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.sequences.get_mut(&id) else {
            return Ok(false);
        };
        let current = &entry.sequence;
        let updated = Sequence::from_parts(
            id,
            patch.name.unwrap_or_else(|| current.name.clone()),
            patch.shots.unwrap_or_else(|| current.shots.clone()),
            patch.settings.or(current.settings),
            current.created_at,
            Utc::now(),
        );
        entry.sequence = updated;
        Ok(true)
    }

    async fn delete(&self, id: SequenceId) -> Result<bool, ApiError> {
        let mut inner = self.inner.write().await;
        Ok(inner.sequences.remove(&id).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{DepthPosition, HorizontalPosition, SequenceSettings, Shot, Space};

    fn shots(n: usize) -> Vec<Shot> {
        (0..n)
            .map(|i| Shot::new(HorizontalPosition::Center, DepthPosition::Mid, Space::for_position(i)))
            .collect()
    }

    fn new_sequence(name: &str, n: usize) -> NewSequence {
        NewSequence {
            name: name.to_string(),
            shots: shots(n),
            settings: None,
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryStore::new();
        let Ok(id) = store.create(new_sequence("drill", 3)).await else {
            panic!("create should succeed");
        };
        let Ok(Some(seq)) = store.get(id).await else {
            panic!("sequence should exist");
        };
        assert_eq!(seq.name, "drill");
        assert_eq!(seq.metadata.total_shots, 3);
        assert!(seq.metadata.updated_at.is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let store = MemoryStore::new();
        let id = SequenceId::new();
        assert!(matches!(store.get(id).await, Ok(None)));
        assert!(matches!(store.update(id, SequencePatch::default()).await, Ok(false)));
        assert!(matches!(store.delete(id).await, Ok(false)));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            let _ = store.create(new_sequence(name, 1)).await;
        }
        let Ok(list) = store.list().await else {
            panic!("list should succeed");
        };
        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn update_replaces_given_fields() {
        let store = MemoryStore::new();
        let Ok(id) = store.create(new_sequence("drill", 2)).await else {
            panic!("create should succeed");
        };
        let patch = SequencePatch {
            shots: Some(shots(4)),
            settings: Some(SequenceSettings {
                min_distance: Some(1.0),
                max_distance: None,
            }),
            ..SequencePatch::default()
        };
        assert!(matches!(store.update(id, patch).await, Ok(true)));

        let Ok(Some(seq)) = store.get(id).await else {
            panic!("sequence should exist");
        };
        assert_eq!(seq.name, "drill");
        assert_eq!(seq.metadata.total_shots, 4);
        assert_eq!(seq.settings.and_then(|s| s.min_distance), Some(1.0));
        assert!(seq.updated_at >= seq.created_at);
    }

    #[tokio::test]
    async fn delete_removes() {
        let store = MemoryStore::new();
        let Ok(id) = store.create(new_sequence("drill", 1)).await else {
            panic!("create should succeed");
        };
        assert!(matches!(store.delete(id).await, Ok(true)));
        assert!(matches!(store.get(id).await, Ok(None)));
        assert!(matches!(store.delete(id).await, Ok(false)));
    }
}
