//! Sequence CRUD handlers: create, list, get, update, delete.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateSequenceRequest, UpdateSequenceRequest};
use crate::app_state::AppState;
use crate::domain::{Sequence, SequenceId, SequenceSummary};
use crate::error::{ApiError, ErrorResponse};

/// Unwraps a JSON body, reporting extractor failures in the API error
/// envelope.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::InvalidRequest(e.body_text()))
}

fn parse_id(raw: &str) -> Result<SequenceId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid sequence id: {raw}")))
}

/// `POST /api/sequences`: Save a new sequence.
///
/// # Errors
///
/// Returns [`ApiError`] when the name, shots or settings are invalid.
#[utoipa::path(
    post,
    path = "/api/sequences",
    tag = "Sequences",
    summary = "Save a sequence",
    description = "Validates the shots with the same rules applied to generated output and stores the sequence.",
    request_body = CreateSequenceRequest,
    responses(
        (status = 201, description = "Sequence created", body = Sequence),
        (status = 400, description = "Invalid name, settings or shot count", body = ErrorResponse),
        (status = 422, description = "A shot broke a validation rule", body = ErrorResponse),
    )
)]
pub async fn create_sequence(
    State(state): State<AppState>,
    payload: Result<Json<CreateSequenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let sequence = state
        .sequence_service
        .create(&req.name, &req.shots, req.settings)
        .await?;
    Ok((StatusCode::CREATED, Json(sequence)))
}

/// `GET /api/sequences`: List saved sequences.
///
/// # Errors
///
/// Returns [`ApiError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/sequences",
    tag = "Sequences",
    summary = "List sequences",
    description = "Returns a summary of every saved sequence, newest first.",
    responses(
        (status = 200, description = "Sequence summaries", body = Vec<SequenceSummary>),
    )
)]
pub async fn list_sequences(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summaries = state.sequence_service.list().await?;
    Ok(Json(summaries))
}

/// `GET /api/sequences/{id}`: Get one sequence.
///
/// # Errors
///
/// Returns [`ApiError::SequenceNotFound`] if the sequence does not exist.
#[utoipa::path(
    get,
    path = "/api/sequences/{id}",
    tag = "Sequences",
    summary = "Get a sequence",
    params(
        ("id" = uuid::Uuid, Path, description = "Sequence UUID"),
    ),
    responses(
        (status = 200, description = "Sequence details", body = Sequence),
        (status = 404, description = "Sequence not found", body = ErrorResponse),
    )
)]
pub async fn get_sequence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sequence = state.sequence_service.get(parse_id(&id)?).await?;
    Ok(Json(sequence))
}

/// `PUT /api/sequences/{id}`: Update a sequence.
///
/// # Errors
///
/// Returns [`ApiError::SequenceNotFound`] if the sequence does not exist,
/// or a validation error for bad fields.
#[utoipa::path(
    put,
    path = "/api/sequences/{id}",
    tag = "Sequences",
    summary = "Update a sequence",
    description = "Replaces the fields present in the body. Replacement shots are revalidated and the shot count follows them.",
    params(
        ("id" = uuid::Uuid, Path, description = "Sequence UUID"),
    ),
    request_body = UpdateSequenceRequest,
    responses(
        (status = 200, description = "Updated sequence", body = Sequence),
        (status = 404, description = "Sequence not found", body = ErrorResponse),
        (status = 422, description = "A shot broke a validation rule", body = ErrorResponse),
    )
)]
pub async fn update_sequence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSequenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let sequence = state
        .sequence_service
        .update(id, req.name.as_deref(), req.shots.as_deref(), req.settings)
        .await?;
    Ok(Json(sequence))
}

/// `DELETE /api/sequences/{id}`: Delete a sequence.
///
/// # Errors
///
/// Returns [`ApiError::SequenceNotFound`] if the sequence does not exist.
#[utoipa::path(
    delete,
    path = "/api/sequences/{id}",
    tag = "Sequences",
    summary = "Delete a sequence",
    params(
        ("id" = uuid::Uuid, Path, description = "Sequence UUID"),
    ),
    responses(
        (status = 204, description = "Sequence deleted"),
        (status = 404, description = "Sequence not found", body = ErrorResponse),
    )
)]
pub async fn delete_sequence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.sequence_service.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sequence CRUD routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sequences", get(list_sequences).post(create_sequence))
        .route(
            "/sequences/{id}",
            get(get_sequence).put(update_sequence).delete(delete_sequence),
        )
}
