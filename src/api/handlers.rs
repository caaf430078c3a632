use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{PosterResponse, RecommendationResponse, TitleQuery},
    services::{recommendations, title_search},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct MovieSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Catalog titles for the selection list, optionally filtered by `q`
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieSearchQuery>,
) -> Json<Vec<String>> {
    let titles = title_search::search_titles(state.recommender.index(), params.q.as_deref());
    Json(titles)
}

/// Top recommendations for a title, with posters
///
/// An unknown title is not an error: the response carries an empty list.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        "Processing recommendation request"
    );

    let response =
        recommendations::get_recommendations(&state.recommender, &state.posters, &params.title)
            .await;

    Ok(Json(response))
}

/// Poster for a single catalog title
pub async fn poster(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<PosterResponse>> {
    if params.title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    if state.recommender.index().resolve_index(&params.title).is_err() {
        return Err(AppError::NotFound(format!(
            "Title not in catalog: {}",
            params.title
        )));
    }

    let poster_url = state.posters.poster_for(&params.title).await;

    Ok(Json(PosterResponse {
        title: params.title,
        poster_url,
    }))
}
