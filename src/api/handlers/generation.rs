//! Generation handlers: LLM-backed and local random sequences.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::sequence::json_body;
use crate::api::dto::{GeneratedSequenceResponse, RandomSequenceRequest};
use crate::app_state::AppState;
use crate::domain::SequenceSettings;
use crate::error::{ApiError, ErrorResponse};
use crate::generation::GenerationRequest;

/// `POST /api/sequences/generate`: Generate a sequence with the text API.
///
/// # Errors
///
/// Returns [`ApiError`] for invalid input, missing configuration, or any
/// upstream or validation failure.
#[utoipa::path(
    post,
    path = "/api/sequences/generate",
    tag = "Generation",
    summary = "Generate a sequence",
    description = "Builds a sport-specific prompt, makes one call to the generative text API, and validates the reply. Distance bounds are passed to the model as guidance. The result is not saved.",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Validated sequence", body = GeneratedSequenceResponse),
        (status = 400, description = "Invalid shot count, distance bounds or sport", body = ErrorResponse),
        (status = 502, description = "Upstream failure or rejected output", body = ErrorResponse),
        (status = 503, description = "Generation is not configured", body = ErrorResponse),
    )
)]
pub async fn generate_sequence(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let shots = state.sequence_service.generate(&req).await?;
    Ok(Json(GeneratedSequenceResponse::from(shots)))
}

/// `POST /api/sequences/random`: Generate a random sequence locally.
///
/// # Errors
///
/// Returns [`ApiError`] for invalid input or when no sequence satisfies the
/// distance bounds.
#[utoipa::path(
    post,
    path = "/api/sequences/random",
    tag = "Generation",
    summary = "Generate a random sequence",
    description = "Draws an alternating sequence whose consecutive distances all lie within the given bounds. The result is not saved.",
    request_body = RandomSequenceRequest,
    responses(
        (status = 200, description = "Random sequence", body = GeneratedSequenceResponse),
        (status = 400, description = "Invalid shot count or bounds", body = ErrorResponse),
        (status = 422, description = "No sequence satisfies the bounds", body = ErrorResponse),
    )
)]
pub async fn random_sequence(
    State(state): State<AppState>,
    payload: Result<Json<RandomSequenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let settings = SequenceSettings {
        min_distance: req.min_distance,
        max_distance: req.max_distance,
    };
    let shots = state.sequence_service.random(req.num_shots, settings)?;
    Ok(Json(GeneratedSequenceResponse::from(shots)))
}

/// Generation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sequences/generate", post(generate_sequence))
        .route("/sequences/random", post(random_sequence))
}
