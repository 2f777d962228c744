//! Acceptance gate for candidate shot sequences.
//!
//! [`validate_sequence`] turns untyped JSON shot objects into typed
//! [`Shot`]s, stopping at the first rule a candidate breaks. The same rules
//! apply to human submissions and to model output.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::position::{DepthPosition, HorizontalPosition, Space};
use super::shot::Shot;

/// Which rule a candidate sequence broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ValidationErrorKind {
    /// The number of candidates differs from the expected count.
    CountMismatch,
    /// A shot lacks `horizontal`, `depth` or `space`.
    MissingField,
    /// `horizontal` is not a canonical horizontal label.
    InvalidHorizontal,
    /// `depth` is not a canonical depth label.
    InvalidDepth,
    /// `space` is not the integer 1 or 2.
    InvalidSpace,
    /// A shot is in the wrong space for its position.
    AlternationViolation,
}

/// First violation found in a candidate sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Rule that was broken.
    pub kind: ValidationErrorKind,
    /// 1-based index of the offending shot; `None` for count mismatches.
    pub shot_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn count_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            kind: ValidationErrorKind::CountMismatch,
            shot_index: None,
            message: format!("expected {expected} shots, got {actual}"),
        }
    }

    fn at(kind: ValidationErrorKind, shot_index: usize, detail: String) -> Self {
        Self {
            kind,
            shot_index: Some(shot_index),
            message: format!("shot {shot_index}: {detail}"),
        }
    }
}

const REQUIRED_FIELDS: [&str; 3] = ["horizontal", "depth", "space"];

/// Validates raw candidates and returns the typed shots in order.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered: a count mismatch is
/// checked before any shot, then each shot is checked for missing fields,
/// horizontal and depth labels, space value, and space alternation.
pub fn validate_sequence(
    candidates: &[Value],
    expected_count: usize,
) -> Result<Vec<Shot>, ValidationError> {
    if candidates.len() != expected_count {
        return Err(ValidationError::count_mismatch(
            expected_count,
            candidates.len(),
        ));
    }

    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| validate_shot(candidate, i))
        .collect()
}

/// Validates the candidate at 0-based position `index`.
fn validate_shot(candidate: &Value, index: usize) -> Result<Shot, ValidationError> {
    let shot_index = index + 1;

    for field in REQUIRED_FIELDS {
        if candidate.get(field).is_none() {
            return Err(ValidationError::at(
                ValidationErrorKind::MissingField,
                shot_index,
                format!("missing required field '{field}'"),
            ));
        }
    }

    let horizontal_value = candidate.get("horizontal").unwrap_or(&Value::Null);
    let horizontal = horizontal_value
        .as_str()
        .and_then(HorizontalPosition::from_label)
        .ok_or_else(|| {
            ValidationError::at(
                ValidationErrorKind::InvalidHorizontal,
                shot_index,
                format!("invalid horizontal position {horizontal_value}"),
            )
        })?;

    let depth_value = candidate.get("depth").unwrap_or(&Value::Null);
    let depth = depth_value
        .as_str()
        .and_then(DepthPosition::from_label)
        .ok_or_else(|| {
            ValidationError::at(
                ValidationErrorKind::InvalidDepth,
                shot_index,
                format!("invalid depth position {depth_value}"),
            )
        })?;

    let space_value = candidate.get("space").unwrap_or(&Value::Null);
    let space = space_value
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .and_then(|n| Space::try_from(n).ok())
        .ok_or_else(|| {
            ValidationError::at(
                ValidationErrorKind::InvalidSpace,
                shot_index,
                format!("invalid space {space_value}, must be 1 or 2"),
            )
        })?;

    let expected_space = Space::for_position(index);
    if space != expected_space {
        return Err(ValidationError::at(
            ValidationErrorKind::AlternationViolation,
            shot_index,
            format!("expected space {expected_space}, got {space}"),
        ));
    }

    Ok(Shot::new(horizontal, depth, space))
}
