use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, MovieList, RecommendationResponse},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(alias = "title")]
    pub movie_title: Option<String>,
    pub count: Option<i64>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All movie titles in catalog order
pub async fn list_movies(State(state): State<AppState>) -> Json<MovieList> {
    let movies = state
        .snapshot()
        .catalog
        .list_titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(MovieList { movies })
}

/// Movies most similar to the given title, enriched with metadata
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(query) = query?;
    let title = query
        .movie_title
        .ok_or_else(|| AppError::InvalidInput("movie_title is required".to_string()))?;
    let count = state.limits.resolve(query.count);

    tracing::info!(
        request_id = %request_id,
        title = %title,
        count,
        "Processing recommendation request"
    );

    let entries = match state.recommender.recommend(&title, count) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::info!(request_id = %request_id, title = %title, error = %e, "Recommendation lookup failed");
            return Err(e);
        }
    };

    let ids: Vec<i64> = entries.iter().map(|e| e.external_id).collect();
    let metadata = state.enricher.enrich_many(&ids).await;

    let recommendations: Vec<Movie> = entries
        .into_iter()
        .zip(metadata)
        .map(|(entry, metadata)| Movie::from_parts(entry, metadata).without_description())
        .collect();

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse { recommendations }))
}

/// Details for a single catalog movie by external id
pub async fn get_movie_details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(movie_id) = movie_id?;
    let entry = state.snapshot().catalog.find_by_external_id(movie_id)?;

    tracing::info!(
        request_id = %request_id,
        external_id = movie_id,
        title = %entry.title,
        "Fetching movie details"
    );

    let metadata = state.enricher.enrich(movie_id).await;
    Ok(Json(Movie::from_parts(entry, metadata)))
}
