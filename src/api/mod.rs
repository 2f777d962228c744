//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api`; system endpoints sit at the
//! root.

pub mod dto;
pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::AppConfig;

/// Slack added on top of the generation timeout for the whole request.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// OpenAPI document covering every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Shot Sequence API", description = "Store and generate sports-training shot sequences."),
    paths(
        handlers::system::root_handler,
        handlers::system::health_handler,
        handlers::system::sports_handler,
        handlers::sequence::create_sequence,
        handlers::sequence::list_sequences,
        handlers::sequence::get_sequence,
        handlers::sequence::update_sequence,
        handlers::sequence::delete_sequence,
        handlers::generation::generate_sequence,
        handlers::generation::random_sequence,
    ),
    tags(
        (name = "System", description = "Service status and reference data"),
        (name = "Sequences", description = "Saved sequence CRUD"),
        (name = "Generation", description = "LLM and random sequence generation"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the CORS layer from the configured origins. Origins that are not
/// valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Builds the served application: routes, state and middleware.
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    let request_timeout = config
        .generation
        .request_timeout
        .saturating_add(REQUEST_TIMEOUT_SLACK);

    build_router()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}
