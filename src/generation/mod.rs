//! Sequence generation: prompt construction, the generative text API
//! client, reply extraction, and a local random generator.
//!
//! ```text
//! GenerationRequest
//!     │
//!     ├── build_prompt          (prompt)
//!     ├── TextGenerator         (client, one call, bounded by a timeout)
//!     ├── extract_json_array    (response)
//!     └── validate_sequence     (domain)
//!     ▼
//! Vec<Shot>
//! ```

pub mod client;
pub mod generator;
pub mod prompt;
pub mod random;
pub mod response;

pub use client::{AnthropicClient, TextGenerator};
pub use generator::{GenerationRequest, SequenceGenerator};
pub use prompt::build_prompt;
pub use random::random_sequence;
pub use response::extract_json_array;

use crate::domain::{UnsupportedSport, ValidationError};

/// Reasons a generation request can fail.
///
/// None of these are retried; each is reported to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Requested shot count is outside `1..=100`.
    #[error("number of shots must be between 1 and 100, got {0}")]
    InvalidShotCount(usize),

    /// Distance bounds are negative, non-finite or inverted.
    #[error("invalid distance bounds: {0}")]
    InvalidSettings(String),

    /// Sport key is not in the reference table.
    #[error(transparent)]
    UnsupportedSport(#[from] UnsupportedSport),

    /// The generative API could not be reached, timed out, or answered
    /// with a non-success status.
    #[error("generation API request failed: {message}")]
    Transport {
        /// HTTP status, when the API answered.
        status: Option<u16>,
        /// Underlying error or response body.
        message: String,
    },

    /// The reply did not contain a parseable JSON array.
    #[error("malformed generation response: {reason}")]
    MalformedResponse {
        /// What went wrong.
        reason: String,
        /// The reply text, kept for diagnostics.
        reply: String,
    },

    /// The parsed array failed a validation rule.
    #[error("generated sequence rejected: {0}")]
    Rejected(#[from] ValidationError),
}
