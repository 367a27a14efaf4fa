use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::list_movies))
        .route("/recommendations", get(handlers::get_recommendations))
        .route("/movie/:movie_id", get(handlers::get_movie_details))
}

/// CORS layer allowing GET requests from the configured origins
pub fn cors_layer(origins: &[String]) -> AppResult<CorsLayer> {
    let origins = origins
        .iter()
        .filter(|origin| !origin.trim().is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| AppError::InvalidInput(format!("bad CORS origin {}: {}", origin, e)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]))
}
