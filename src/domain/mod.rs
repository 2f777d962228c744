//! Domain layer: shot vocabulary, sequence records, validation rules and
//! sport reference data.
//!
//! Everything in this module is pure and deterministic; no I/O happens here.

pub mod position;
pub mod sequence;
pub mod sequence_id;
pub mod shot;
pub mod sport;
pub mod validation;

pub use position::{DepthPosition, HorizontalPosition, Space};
pub use sequence::{Sequence, SequenceMetadata, SequenceSettings, SequenceSummary};
pub use sequence_id::SequenceId;
pub use shot::{GridPoint, Shot, consecutive_distances};
pub use sport::{Sport, SportProfile, UnsupportedSport};
pub use validation::{ValidationError, ValidationErrorKind, validate_sequence};
