//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SequenceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sequence service for all business logic.
    pub sequence_service: Arc<SequenceService>,
}

impl AppState {
    /// Wraps a service for sharing across handlers.
    #[must_use]
    pub fn new(sequence_service: SequenceService) -> Self {
        Self {
            sequence_service: Arc::new(sequence_service),
        }
    }
}
