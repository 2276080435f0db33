use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/movies", get(handlers::list_movies))
        .route("/movies/:id/similar", get(handlers::similar_movies))
        .route("/catalog/refresh", post(handlers::refresh_catalog))
        // Genres
        .route("/genres", get(handlers::known_genres))
        .route("/genres/:genre/top", get(handlers::genre_top))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route("/taste", post(handlers::taste_analysis))
}
