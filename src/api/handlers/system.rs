//! System endpoints: root banner, health check, sport catalogue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::Sport;

/// Root banner response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    message: &'static str,
    version: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
    storage: StorageStatus,
    generation_enabled: bool,
}

/// Storage part of the health response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageStatus {
    backend: &'static str,
    reachable: bool,
}

/// Supported sport info.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SportInfo {
    sport: Sport,
    court: &'static str,
    shot_types: &'static str,
    has_constraints: bool,
}

/// `GET /`: Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service name and version", body = RootResponse),
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: "Shot Sequence API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, timestamp and storage reachability. Answers 503 when the store cannot be reached.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.sequence_service;
    let storage = service.storage_health().await;
    let (code, status) = if storage.reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };
    (
        code,
        Json(HealthResponse {
            status,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            storage: StorageStatus {
                backend: storage.backend,
                reachable: storage.reachable,
            },
            generation_enabled: service.generation_enabled(),
        }),
    )
}

/// `GET /api/sports`: List supported sports.
#[utoipa::path(
    get,
    path = "/api/sports",
    tag = "System",
    summary = "List supported sports",
    description = "Returns every sport the generator accepts, with its court layout and whether shot-type constraints apply.",
    responses(
        (status = 200, description = "Sport catalogue", body = Vec<SportInfo>),
    )
)]
pub async fn sports_handler() -> impl IntoResponse {
    let sports: Vec<SportInfo> = Sport::ALL
        .into_iter()
        .map(|sport| {
            let profile = sport.profile();
            SportInfo {
                sport,
                court: profile.court_description,
                shot_types: profile.shot_types,
                has_constraints: profile.has_constraints(),
            }
        })
        .collect();
    Json(sports)
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/sports", get(sports_handler))
}
