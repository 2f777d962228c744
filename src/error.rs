//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the HTTP surface. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{SequenceId, ValidationError, ValidationErrorKind};
use crate::generation::GenerationError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1004,
///     "message": "shot 2: expected space 2, got 1",
///     "details": { "kind": "AlternationViolation", "shotIndex": 2 }
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Which validation rule failed, for sequence rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Machine-readable detail of a validation failure.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Rule that was broken.
    pub kind: ValidationErrorKind,
    /// 1-based index of the offending shot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_index: Option<usize>,
}

impl From<&ValidationError> for ErrorDetails {
    fn from(err: &ValidationError) -> Self {
        Self {
            kind: err.kind,
            shot_index: err.shot_index,
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status         |
/// |-----------|---------------------|---------------------|
/// | 1000–1999 | Request validation  | 400 / 422           |
/// | 2000–2999 | Not found           | 404                 |
/// | 3000–3999 | Server              | 500 / 503           |
/// | 5000–5999 | Generation          | 502 / 422           |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body or parameters are malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Sport key is not in the reference table.
    #[error("unsupported sport: {0}")]
    UnsupportedSport(String),

    /// Requested shot count is outside `1..=100`.
    #[error("number of shots must be between 1 and 100, got {0}")]
    InvalidShotCount(usize),

    /// A submitted shot list failed validation.
    #[error("invalid sequence: {0}")]
    InvalidSequence(ValidationError),

    /// Sequence with the given ID was not found.
    #[error("sequence not found: {0}")]
    SequenceNotFound(SequenceId),

    /// Storage layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// No API key is configured, so LLM generation is off.
    #[error("sequence generation is not configured")]
    GenerationUnavailable,

    /// The generative API could not be reached or answered with an error.
    #[error("generation API request failed: {0}")]
    UpstreamTransport(String),

    /// The generative API reply held no parseable JSON array.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    /// The generated sequence failed validation.
    #[error("generated sequence rejected: {0}")]
    GenerationRejected(ValidationError),

    /// Random generation found no sequence within the distance bounds.
    #[error("no sequence satisfies the distance bounds after {attempts} attempts")]
    NoFeasibleSequence {
        /// Attempts made before giving up.
        attempts: usize,
    },
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::UnsupportedSport(_) => 1002,
            Self::InvalidShotCount(_) => 1003,
            Self::InvalidSequence(_) => 1004,
            Self::SequenceNotFound(_) => 2001,
            Self::PersistenceError(_) => 3001,
            Self::GenerationUnavailable => 3002,
            Self::UpstreamTransport(_) => 5001,
            Self::MalformedResponse(_) => 5002,
            Self::GenerationRejected(_) => 5003,
            Self::NoFeasibleSequence { .. } => 5004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedSport(_) | Self::InvalidShotCount(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidSequence(_) | Self::NoFeasibleSequence { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::SequenceNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GenerationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamTransport(_)
            | Self::MalformedResponse(_)
            | Self::GenerationRejected(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn details(&self) -> Option<ErrorDetails> {
        match self {
            Self::InvalidSequence(err) | Self::GenerationRejected(err) => Some(err.into()),
            _ => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidSequence(err)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidShotCount(n) => Self::InvalidShotCount(n),
            GenerationError::InvalidSettings(reason) => Self::InvalidRequest(reason),
            GenerationError::UnsupportedSport(e) => Self::UnsupportedSport(e.0),
            GenerationError::Transport { message, .. } => Self::UpstreamTransport(message),
            GenerationError::MalformedResponse { reason, .. } => Self::MalformedResponse(reason),
            GenerationError::Rejected(e) => Self::GenerationRejected(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;
    use crate::domain::UnsupportedSport;

    async fn body_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let Ok(collected) = response.into_body().collect().await else {
            panic!("body should collect");
        };
        let Ok(json) = serde_json::from_slice(&collected.to_bytes()) else {
            panic!("body should be JSON");
        };
        (status, json)
    }

    fn alternation_error() -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::AlternationViolation,
            shot_index: Some(2),
            message: "shot 2: expected space 2, got 1".to_string(),
        }
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let id = SequenceId::new();
        let (status, json) = body_json(ApiError::SequenceNotFound(id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], 2001);
        assert!(json["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn validation_details_carry_kind_and_index() {
        let (status, json) = body_json(ApiError::from(alternation_error())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], 1004);
        assert_eq!(json["error"]["details"]["kind"], "AlternationViolation");
        assert_eq!(json["error"]["details"]["shotIndex"], 2);
    }

    #[test]
    fn generation_errors_map_to_codes() {
        let cases = [
            (GenerationError::InvalidShotCount(0), 1003, StatusCode::BAD_REQUEST),
            (
                GenerationError::InvalidSettings("minDistance must be a non-negative number".into()),
                1001,
                StatusCode::BAD_REQUEST,
            ),
            (
                GenerationError::UnsupportedSport(UnsupportedSport("golf".into())),
                1002,
                StatusCode::BAD_REQUEST,
            ),
            (
                GenerationError::Transport {
                    status: Some(500),
                    message: "boom".into(),
                },
                5001,
                StatusCode::BAD_GATEWAY,
            ),
            (
                GenerationError::MalformedResponse {
                    reason: "no JSON array".into(),
                    reply: "nope".into(),
                },
                5002,
                StatusCode::BAD_GATEWAY,
            ),
            (
                GenerationError::Rejected(alternation_error()),
                5003,
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (source, code, status) in cases {
            let err = ApiError::from(source);
            assert_eq!(err.error_code(), code, "{err}");
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[tokio::test]
    async fn rejected_generation_keeps_details() {
        let err = ApiError::from(GenerationError::Rejected(alternation_error()));
        let (_, json) = body_json(err).await;
        assert_eq!(json["error"]["details"]["kind"], "AlternationViolation");
    }

    #[test]
    fn server_side_codes() {
        assert_eq!(
            ApiError::GenerationUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::PersistenceError("disk full".into()).error_code(),
            3001
        );
        let infeasible = ApiError::NoFeasibleSequence { attempts: 10 };
        assert_eq!(infeasible.error_code(), 5004);
        assert_eq!(infeasible.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
