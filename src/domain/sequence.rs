//! Stored sequence records and their metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SequenceId;
use super::shot::Shot;

/// Maximum number of shots in one sequence.
pub const MAX_SHOTS: usize = 100;

/// Maximum sequence name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Distance bounds a sequence was generated with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSettings {
    /// Minimum distance between consecutive shots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<f64>,
    /// Maximum distance between consecutive shots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
}

impl SequenceSettings {
    /// Checks that present bounds are finite, non-negative and ordered.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending bound.
    pub fn check(&self) -> Result<(), String> {
        for (field, value) in [
            ("minDistance", self.min_distance),
            ("maxDistance", self.max_distance),
        ] {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                return Err(format!("{field} must be a non-negative number, got {v}"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_distance, self.max_distance)
            && min > max
        {
            return Err(format!(
                "minDistance ({min}) must not exceed maxDistance ({max})"
            ));
        }
        Ok(())
    }
}

/// Derived bookkeeping attached to every sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SequenceMetadata {
    /// Always equal to the number of shots.
    pub total_shots: usize,
    /// Creation time; never changes.
    pub created_at: DateTime<Utc>,
    /// Last mutation time; absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A named, ordered list of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    /// Unique identifier.
    pub id: SequenceId,
    /// User-supplied name.
    pub name: String,
    /// Shots in play order.
    pub shots: Vec<Shot>,
    /// Generation settings, if any were recorded.
    pub settings: Option<SequenceSettings>,
    /// Derived metadata.
    pub metadata: SequenceMetadata,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Sequence {
    /// Assembles a sequence from stored columns, deriving the metadata so
    /// that `total_shots` always matches `shots`.
    #[must_use]
    pub fn from_parts(
        id: SequenceId,
        name: String,
        shots: Vec<Shot>,
        settings: Option<SequenceSettings>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let metadata = SequenceMetadata {
            total_shots: shots.len(),
            created_at,
            updated_at: (updated_at != created_at).then_some(updated_at),
        };
        Self {
            id,
            name,
            shots,
            settings,
            metadata,
            created_at,
            updated_at,
        }
    }

    /// Summary view of this sequence.
    #[must_use]
    pub fn summary(&self) -> SequenceSummary {
        SequenceSummary {
            id: self.id,
            name: self.name.clone(),
            total_shots: self.shots.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Lightweight listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSummary {
    /// Sequence identifier.
    pub id: SequenceId,
    /// Sequence name.
    pub name: String,
    /// Number of shots.
    pub total_shots: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{DepthPosition, HorizontalPosition, Space};

    fn shots(n: usize) -> Vec<Shot> {
        (0..n)
            .map(|i| Shot::new(HorizontalPosition::Center, DepthPosition::Mid, Space::for_position(i)))
            .collect()
    }

    #[test]
    fn metadata_tracks_shot_count() {
        let now = Utc::now();
        let seq = Sequence::from_parts(SequenceId::new(), "drill".into(), shots(3), None, now, now);
        assert_eq!(seq.metadata.total_shots, 3);
        assert_eq!(seq.metadata.created_at, now);
        assert_eq!(seq.metadata.updated_at, None);
        assert_eq!(seq.summary().total_shots, 3);
    }

    #[test]
    fn metadata_records_later_update() {
        let created = Utc::now();
        let updated = created + Duration::seconds(5);
        let seq =
            Sequence::from_parts(SequenceId::new(), "drill".into(), shots(1), None, created, updated);
        assert_eq!(seq.metadata.updated_at, Some(updated));
    }

    #[test]
    fn serializes_camel_case() {
        let now = Utc::now();
        let settings = SequenceSettings {
            min_distance: Some(1.0),
            max_distance: None,
        };
        let seq =
            Sequence::from_parts(SequenceId::new(), "drill".into(), shots(2), Some(settings), now, now);
        let json = serde_json::to_value(&seq).unwrap_or_default();
        assert_eq!(json["metadata"]["totalShots"], 2);
        assert_eq!(json["settings"]["minDistance"], 1.0);
        assert!(json["settings"].get("maxDistance").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn settings_check_rejects_negative_and_inverted_bounds() {
        let ok = SequenceSettings {
            min_distance: Some(0.0),
            max_distance: Some(2.5),
        };
        assert!(ok.check().is_ok());

        let negative = SequenceSettings {
            min_distance: Some(-1.0),
            max_distance: None,
        };
        assert!(negative.check().is_err());

        let inverted = SequenceSettings {
            min_distance: Some(3.0),
            max_distance: Some(1.0),
        };
        assert!(inverted.check().is_err());

        assert!(SequenceSettings::default().check().is_ok());
    }
}
