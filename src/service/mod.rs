//! Service layer: business logic orchestration.
//!
//! [`SequenceService`] validates submissions, delegates storage to the
//! configured [`crate::persistence::SequenceStore`], and runs generation.

pub mod sequence_service;

pub use sequence_service::{SequenceService, StorageHealth};
