use std::time::Duration;

use axum::{
    Json, Router, middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use quotes_types::api::HealthResponse;

use crate::auth::AppState;
use crate::middleware::require_token;
use crate::quotes;

/// All API routes, without transport layers. See [`app`].
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/get-random-quotes", get(quotes::random_quotes))
        .route("/api/v1/get-quote-by-id", get(quotes::quote_by_id))
        .route("/api/v1/search", get(quotes::search))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/api/v1/add-quote", post(quotes::add_quote))
        .route("/api/v1/delete-quote/{id}", delete(quotes::delete_quote))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// The served application: [`router`] behind a per-request deadline
/// (answered with 408), permissive CORS and request tracing.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
