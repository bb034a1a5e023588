use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::ServerState};

pub mod auth;
pub mod characters;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn metrics_text() -> impl IntoResponse {
    metrics::encode_metrics()
}

/// Build the full application router: public reads, bearer-protected writes,
/// health, metrics and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/auth/login", post(auth::login))
        .route("/characters", get(characters::list))
        .route("/characters/:id", get(characters::get));

    // Mutating routes require a bearer token
    let protected = Router::new()
        .route("/characters", post(characters::create))
        .route("/characters/:id", put(characters::update).delete(characters::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    public
        .merge(protected)
        .route_layer(middleware::from_fn(metrics::track_metrics))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
