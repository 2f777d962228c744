//! LLM-backed sequence generator.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;

use super::prompt::build_prompt;
use super::response::extract_json_array;
use super::{GenerationError, TextGenerator};
use crate::domain::sequence::MAX_SHOTS;
use crate::domain::{SequenceSettings, Shot, Sport, validate_sequence};

/// Parameters of one generation request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Sport key, matched case-insensitively.
    pub sport: String,
    /// Natural-language training purpose.
    pub purpose: String,
    /// Number of shots to generate (1 to 100).
    pub num_shots: usize,
    /// Advisory minimum distance between consecutive shots.
    #[serde(default)]
    pub min_distance: Option<f64>,
    /// Advisory maximum distance between consecutive shots.
    #[serde(default)]
    pub max_distance: Option<f64>,
}

impl GenerationRequest {
    /// Checks the request shape without any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidShotCount`],
    /// [`GenerationError::InvalidSettings`] or
    /// [`GenerationError::UnsupportedSport`].
    pub fn check(&self) -> Result<Sport, GenerationError> {
        if !(1..=MAX_SHOTS).contains(&self.num_shots) {
            return Err(GenerationError::InvalidShotCount(self.num_shots));
        }
        self.settings()
            .check()
            .map_err(GenerationError::InvalidSettings)?;
        Ok(self.sport.parse::<Sport>()?)
    }

    /// Distance bounds carried by the request.
    #[must_use]
    pub const fn settings(&self) -> SequenceSettings {
        SequenceSettings {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
        }
    }
}

/// Turns generation requests into validated shot lists.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    client: Arc<dyn TextGenerator>,
}

impl SequenceGenerator {
    /// Creates a generator backed by the given text API.
    #[must_use]
    pub fn new(client: Arc<dyn TextGenerator>) -> Self {
        Self { client }
    }

    /// Runs one generation: shape check, prompt, single API call,
    /// extraction and validation.
    ///
    /// Distance bounds only shape the prompt; the returned shots are not
    /// re-checked against them.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerationError`] raised by any step. The API is
    /// called at most once and never when the request shape is invalid.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Shot>, GenerationError> {
        let sport = request.check()?;

        let prompt = build_prompt(
            sport.key(),
            &request.purpose,
            request.num_shots,
            request.min_distance,
            request.max_distance,
        );
        tracing::debug!(
            %sport,
            num_shots = request.num_shots,
            prompt_len = prompt.len(),
            "requesting generated sequence"
        );

        let reply = self.client.complete(&prompt).await?;
        let candidates = extract_json_array(&reply)?;
        let shots = validate_sequence(&candidates, request.num_shots)?;

        tracing::info!(%sport, num_shots = shots.len(), "generated sequence accepted");
        Ok(shots)
    }
}
