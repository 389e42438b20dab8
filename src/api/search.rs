use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, SearchResultDto, SelectRequest};
use crate::models::MediaType;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// `GET /api/search?query=`
///
/// Combined movie+series search ranked by vote average, with genre
/// identifiers resolved to display names. A failed genre-catalog fetch
/// degrades to unresolved names rather than failing the search.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResultDto>>>, ApiError> {
    let results = state.shared.search_service.search(&params.query).await?;

    let (movie_genres, tv_genres) = tokio::join!(
        state.shared.tmdb.movie_genres(),
        state.shared.tmdb.tv_genres()
    );
    let movie_genres = movie_genres.unwrap_or_else(|e| {
        warn!("Failed to fetch movie genres: {e:#}");
        HashMap::new()
    });
    let tv_genres = tv_genres.unwrap_or_else(|e| {
        warn!("Failed to fetch tv genres: {e:#}");
        HashMap::new()
    });

    let dtos = results
        .into_iter()
        .map(|item| {
            let catalog = match item.media_type {
                MediaType::Movie => &movie_genres,
                MediaType::Tv => &tv_genres,
            };
            let names = item
                .genres
                .iter()
                .filter_map(|gid| gid.parse::<i32>().ok())
                .filter_map(|id| catalog.get(&id).cloned())
                .collect();
            SearchResultDto::from_item(item, names)
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// `POST /api/search/select`
///
/// Records that a search result was selected. The counter write runs
/// fire-and-forget; the response never waits on it and a failed write is
/// logged inside the service.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> Json<ApiResponse<()>> {
    let service = state.shared.search_service.clone();
    tokio::spawn(async move {
        service.record_selection(&request.term, &request.item).await;
    });

    Json(ApiResponse::success(()))
}
