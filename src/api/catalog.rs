use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::search::SearchQuery;
use super::{ApiError, ApiResponse, AppState};
use crate::clients::tmdb::{MovieDetails, TvDetails};
use crate::models::ContentItem;

/// `GET /api/movies?query=`
///
/// First page of movies: text search, or popularity-sorted discovery when
/// the query is empty.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ContentItem>>>, ApiError> {
    let items = state
        .shared
        .tmdb
        .search_movies(&params.query)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(items)))
}

/// `GET /api/tv?query=`
pub async fn list_tv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ContentItem>>>, ApiError> {
    let items = state
        .shared
        .tmdb
        .search_tv(&params.query)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(items)))
}

/// `GET /api/movies/{id}`
pub async fn movie_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieDetails>>, ApiError> {
    let details = state
        .shared
        .tmdb
        .movie_details(id)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Movie", id))?;

    Ok(Json(ApiResponse::success(details)))
}

/// `GET /api/tv/{id}`
pub async fn tv_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TvDetails>>, ApiError> {
    let details = state
        .shared
        .tmdb
        .tv_details(id)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Series", id))?;

    Ok(Json(ApiResponse::success(details)))
}

/// `GET /api/genres/movies`
pub async fn movie_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HashMap<i32, String>>>, ApiError> {
    let catalog = state
        .shared
        .tmdb
        .movie_genres()
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(catalog)))
}

/// `GET /api/genres/tv`
pub async fn tv_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HashMap<i32, String>>>, ApiError> {
    let catalog = state
        .shared
        .tmdb
        .tv_genres()
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(catalog)))
}
