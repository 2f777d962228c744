//! Generation DTOs for LLM and random sequence endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Shot, consecutive_distances};

/// Request body for `POST /api/sequences/random`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomSequenceRequest {
    /// Number of shots to generate (1 to 100).
    pub num_shots: usize,
    /// Minimum distance between consecutive shots.
    #[serde(default)]
    pub min_distance: Option<f64>,
    /// Maximum distance between consecutive shots.
    #[serde(default)]
    pub max_distance: Option<f64>,
}

/// Response body for both generation endpoints. Nothing is persisted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSequenceResponse {
    /// Generated shots in play order.
    pub shots: Vec<Shot>,
    /// Number of shots.
    pub total_shots: usize,
    /// Distance between each pair of consecutive shots.
    pub distances: Vec<f64>,
}

impl From<Vec<Shot>> for GeneratedSequenceResponse {
    fn from(shots: Vec<Shot>) -> Self {
        Self {
            distances: consecutive_distances(&shots),
            total_shots: shots.len(),
            shots,
        }
    }
}
