use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use super::{ApiError, ApiResponse, AppState, TrendingDto};
use crate::models::ContentItem;

/// Home surface: both trending carousels plus the latest catalogs.
#[derive(Debug, Serialize)]
pub struct OverviewDto {
    pub trending_movies: Vec<TrendingDto>,
    pub trending_tv: Vec<TrendingDto>,
    pub latest_movies: Vec<ContentItem>,
    pub latest_tv: Vec<ContentItem>,
}

/// `GET /api/overview`
///
/// All four sections are fetched concurrently and settle before the
/// response; any failure surfaces as one combined error with the first
/// failure's message, ready for a retry affordance.
pub async fn home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<OverviewDto>>, ApiError> {
    let overview = state.shared.overview_service.home().await?;

    Ok(Json(ApiResponse::success(OverviewDto {
        trending_movies: overview
            .trending_movies
            .into_iter()
            .map(TrendingDto::from)
            .collect(),
        trending_tv: overview
            .trending_tv
            .into_iter()
            .map(TrendingDto::from)
            .collect(),
        latest_movies: overview.latest_movies,
        latest_tv: overview.latest_tv,
    })))
}
