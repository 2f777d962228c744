//! Sequence service: validation, storage and generation orchestration.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::sequence::{MAX_NAME_LEN, MAX_SHOTS};
use crate::domain::{Sequence, SequenceId, SequenceSettings, SequenceSummary, Shot, validate_sequence};
use crate::error::ApiError;
use crate::generation::random::MAX_ATTEMPTS;
use crate::generation::{GenerationError, GenerationRequest, SequenceGenerator, random_sequence};
use crate::persistence::{NewSequence, SequencePatch, SequenceStore};

/// Characters of an unparseable model reply kept in debug logs.
const REPLY_LOG_CHARS: usize = 500;

/// Orchestration layer for every sequence operation.
///
/// Stateless coordinator: owns the [`SequenceStore`] and, when an API key
/// is configured, the [`SequenceGenerator`]. Human submissions pass
/// through the same validator as generated output before they are stored.
#[derive(Debug, Clone)]
pub struct SequenceService {
    store: Arc<dyn SequenceStore>,
    generator: Option<SequenceGenerator>,
}

/// Health of the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHealth {
    /// Backend name.
    pub backend: &'static str,
    /// Whether the ping succeeded.
    pub reachable: bool,
}

impl SequenceService {
    /// Creates a service. Pass `None` for `generator` to disable LLM
    /// generation.
    #[must_use]
    pub fn new(store: Arc<dyn SequenceStore>, generator: Option<SequenceGenerator>) -> Self {
        Self { store, generator }
    }

    /// Returns `true` if LLM generation is configured.
    #[must_use]
    pub const fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Validates and stores a new sequence, returning it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a bad name or settings,
    /// [`ApiError::InvalidShotCount`] for an empty or oversized list,
    /// [`ApiError::InvalidSequence`] when a shot breaks a rule, or a
    /// persistence error.
    pub async fn create(
        &self,
        name: &str,
        shots: &[Value],
        settings: Option<SequenceSettings>,
    ) -> Result<Sequence, ApiError> {
        let name = check_name(name)?;
        let shots = check_shots(shots)?;
        check_settings(settings.as_ref())?;

        let id = self
            .store
            .create(NewSequence {
                name,
                shots,
                settings,
            })
            .await?;
        tracing::info!(%id, "sequence created");
        self.get(id).await
    }

    /// Loads one sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SequenceNotFound`] if the ID is unknown.
    pub async fn get(&self, id: SequenceId) -> Result<Sequence, ApiError> {
        self.store
            .get(id)
            .await?
            .ok_or(ApiError::SequenceNotFound(id))
    }

    /// Lists summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn list(&self) -> Result<Vec<SequenceSummary>, ApiError> {
        self.store.list().await
    }

    /// Applies a partial update and returns the updated sequence.
    ///
    /// Present fields are checked with the same rules as [`Self::create`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, or
    /// [`ApiError::SequenceNotFound`] if the ID is unknown.
    pub async fn update(
        &self,
        id: SequenceId,
        name: Option<&str>,
        shots: Option<&[Value]>,
        settings: Option<SequenceSettings>,
    ) -> Result<Sequence, ApiError> {
        let patch = SequencePatch {
            name: name.map(check_name).transpose()?,
            shots: shots.map(check_shots).transpose()?,
            settings,
        };
        check_settings(patch.settings.as_ref())?;

        if !self.store.update(id, patch).await? {
            return Err(ApiError::SequenceNotFound(id));
        }
        tracing::info!(%id, "sequence updated");
        self.get(id).await
    }

    /// Deletes a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SequenceNotFound`] if the ID is unknown.
    pub async fn delete(&self, id: SequenceId) -> Result<(), ApiError> {
        if !self.store.delete(id).await? {
            return Err(ApiError::SequenceNotFound(id));
        }
        tracing::info!(%id, "sequence deleted");
        Ok(())
    }

    /// Generates a sequence with the configured text API. Nothing is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::GenerationUnavailable`] when no generator is
    /// configured, otherwise the mapped [`crate::generation::GenerationError`].
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Shot>, ApiError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(ApiError::GenerationUnavailable)?;
        generator.generate(request).await.map_err(|e| {
            tracing::warn!(sport = %request.sport, error = %e, "generation failed");
            if let GenerationError::MalformedResponse { reply, .. } = &e {
                tracing::debug!(
                    reply = reply_excerpt(reply),
                    reply_len = reply.len(),
                    "unparseable generation reply"
                );
            }
            ApiError::from(e)
        })
    }

    /// Generates a random alternating sequence within the distance bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidShotCount`] or [`ApiError::InvalidRequest`]
    /// for bad input, and [`ApiError::NoFeasibleSequence`] when no sequence
    /// satisfying the bounds was found.
    pub fn random(&self, num_shots: usize, settings: SequenceSettings) -> Result<Vec<Shot>, ApiError> {
        if !(1..=MAX_SHOTS).contains(&num_shots) {
            return Err(ApiError::InvalidShotCount(num_shots));
        }
        check_settings(Some(&settings))?;

        let mut rng = rand::thread_rng();
        random_sequence(
            num_shots,
            settings.min_distance,
            settings.max_distance,
            &mut rng,
        )
        .ok_or(ApiError::NoFeasibleSequence {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Pings the storage backend.
    pub async fn storage_health(&self) -> StorageHealth {
        let reachable = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "storage ping failed");
                false
            }
        };
        StorageHealth {
            backend: self.store.backend_name(),
            reachable,
        }
    }
}

/// Names are stored exactly as submitted; only the length is checked.
fn check_name(name: &str) -> Result<String, ApiError> {
    if name.is_empty() {
        return Err(ApiError::InvalidRequest("name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::InvalidRequest(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Leading slice of a reply, cut on a character boundary.
fn reply_excerpt(reply: &str) -> &str {
    reply
        .char_indices()
        .nth(REPLY_LOG_CHARS)
        .and_then(|(end, _)| reply.get(..end))
        .unwrap_or(reply)
}

fn check_shots(shots: &[Value]) -> Result<Vec<Shot>, ApiError> {
    if !(1..=MAX_SHOTS).contains(&shots.len()) {
        return Err(ApiError::InvalidShotCount(shots.len()));
    }
    Ok(validate_sequence(shots, shots.len())?)
}

fn check_settings(settings: Option<&SequenceSettings>) -> Result<(), ApiError> {
    settings
        .map_or(Ok(()), SequenceSettings::check)
        .map_err(ApiError::InvalidRequest)
}
