use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState, TrendingDto};
use crate::constants::limits;
use crate::models::MediaType;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    /// Entries to return; defaults to the carousel size, capped at the
    /// list-view size.
    pub limit: Option<usize>,
}

/// `GET /api/trending/movies`
pub async fn trending_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<Vec<TrendingDto>>>, ApiError> {
    trending(&state, MediaType::Movie, &params).await
}

/// `GET /api/trending/tv`
pub async fn trending_tv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<Vec<TrendingDto>>>, ApiError> {
    trending(&state, MediaType::Tv, &params).await
}

async fn trending(
    state: &AppState,
    media_type: MediaType,
    params: &TrendingQuery,
) -> Result<Json<ApiResponse<Vec<TrendingDto>>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(limits::CAROUSEL_TRENDING)
        .min(limits::LIST_TRENDING);

    let entries = state
        .shared
        .trending_service
        .top(media_type, limit)
        .await?;

    Ok(Json(ApiResponse::success(
        entries.into_iter().map(TrendingDto::from).collect(),
    )))
}
