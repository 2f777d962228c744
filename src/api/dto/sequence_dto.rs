//! Sequence DTOs for create and update requests.
//!
//! Responses reuse the domain types directly: [`crate::domain::Sequence`]
//! for detail views and [`crate::domain::SequenceSummary`] for listings.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{SequenceSettings, Shot};

/// Request body for `POST /api/sequences`.
///
/// Shots are accepted untyped so that each one is checked by the sequence
/// validator and a failure names the offending shot.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSequenceRequest {
    /// Sequence name (1 to 100 characters).
    pub name: String,
    /// Shots in play order (1 to 100).
    #[schema(value_type = Vec<Shot>)]
    pub shots: Vec<Value>,
    /// Generation settings to keep with the sequence.
    #[serde(default)]
    pub settings: Option<SequenceSettings>,
}

/// Request body for `PUT /api/sequences/{id}`. Absent fields are kept.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSequenceRequest {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement shots.
    #[serde(default)]
    #[schema(value_type = Option<Vec<Shot>>)]
    pub shots: Option<Vec<Value>>,
    /// Replacement settings.
    #[serde(default)]
    pub settings: Option<SequenceSettings>,
}
