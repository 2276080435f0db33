use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, PreferenceProfile, ScoredResult, TasteAnalysis},
    services::engine::DEFAULT_TOP_N,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: PreferenceProfile,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct GenreTopQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub min_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub titles: Vec<String>,
}

fn default_limit() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub director: String,
    pub cast: Vec<String>,
    pub rating: f64,
    pub votes: u64,
    pub synopsis: String,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            year: movie.year,
            genres: movie.genres.clone(),
            director: movie.director.clone(),
            cast: movie.cast.clone(),
            rating: movie.rating,
            votes: movie.votes,
            synopsis: movie.synopsis.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoredResultResponse {
    pub movie: MovieResponse,
    pub score: f64,
    pub preference_score: f64,
    pub quality_score: f64,
    pub explanation: String,
}

impl From<&ScoredResult> for ScoredResultResponse {
    fn from(result: &ScoredResult) -> Self {
        Self {
            movie: MovieResponse::from(&result.movie),
            score: result.score,
            preference_score: result.breakdown.preference,
            quality_score: result.breakdown.quality,
            explanation: result.explanation.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub provider: String,
    pub fetched: usize,
    pub failed_titles: Vec<String>,
    pub catalog_size: usize,
    pub refreshed_at: DateTime<Utc>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the current catalog
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let engine = state.engine.read().await;
    let movies = engine
        .catalog()
        .movies()
        .iter()
        .map(MovieResponse::from)
        .collect();
    Json(movies)
}

/// Personalized recommendations for a preference profile
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<ScoredResultResponse>>> {
    tracing::info!(
        genres = request.profile.genres.len(),
        actors = request.profile.actors.len(),
        directors = request.profile.directors.len(),
        limit = request.limit,
        "Processing recommendation request"
    );

    let engine = state.engine.read().await;
    let results = engine.recommendations(&request.profile, request.limit)?;
    Ok(Json(results.iter().map(ScoredResultResponse::from).collect()))
}

/// Movies similar to the given movie
pub async fn similar_movies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<Vec<ScoredResultResponse>>> {
    let engine = state.engine.read().await;
    let results = engine.similar_movies(&MovieId(id), params.limit)?;
    Ok(Json(results.iter().map(ScoredResultResponse::from).collect()))
}

/// Genres available in the catalog, for selection controls
pub async fn known_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    let engine = state.engine.read().await;
    Json(engine.known_genres().to_vec())
}

/// Top movies in one genre, ranked by rating
pub async fn genre_top(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(params): Query<GenreTopQuery>,
) -> AppResult<Json<Vec<ScoredResultResponse>>> {
    let engine = state.engine.read().await;
    let results = engine.genre_top_movies(&genre, params.limit, params.min_rating)?;
    Ok(Json(results.iter().map(ScoredResultResponse::from).collect()))
}

/// Aggregate taste statistics for a profile
pub async fn taste_analysis(
    State(state): State<AppState>,
    Json(profile): Json<PreferenceProfile>,
) -> Json<TasteAnalysis> {
    let engine = state.engine.read().await;
    Json(engine.taste_analysis(&profile))
}

/// Enrich the catalog from the configured provider and reload the engine
pub async fn refresh_catalog(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let provider = state.provider.as_ref().ok_or(AppError::ProviderUnavailable)?;
    if request.titles.is_empty() {
        return Err(AppError::InvalidInput(
            "Must provide at least one title to look up".to_string(),
        ));
    }

    tracing::info!(
        provider = provider.name(),
        titles = request.titles.len(),
        "Refreshing catalog"
    );

    let batch = provider.lookup_batch(request.titles).await?;
    let fetched = batch.records.len();

    let mut engine = state.engine.write().await;
    let merged = engine.catalog().merged_with(batch.records);
    engine.reload(merged);
    let catalog_size = engine.catalog().len();
    drop(engine);

    Ok(Json(RefreshResponse {
        provider: provider.name().to_string(),
        fetched,
        failed_titles: batch.failed,
        catalog_size,
        refreshed_at: Utc::now(),
    }))
}
