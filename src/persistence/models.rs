//! Write models accepted by the sequence stores.

use crate::domain::{SequenceSettings, Shot};

/// A sequence about to be inserted. Shots are already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSequence {
    /// Sequence name.
    pub name: String,
    /// Shots in play order.
    pub shots: Vec<Shot>,
    /// Generation settings, if any.
    pub settings: Option<SequenceSettings>,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequencePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement shot list; `total_shots` follows it.
    pub shots: Option<Vec<Shot>>,
    /// Replacement settings.
    pub settings: Option<SequenceSettings>,
}
