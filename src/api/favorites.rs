use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::Serialize;
use tower_sessions::Session;

use super::auth::require_uid;
use super::{ApiError, ApiResponse, AppState};
use crate::models::{Favorite, NewFavorite};

#[derive(Debug, Serialize)]
pub struct AddFavoriteOutcome {
    /// False when the (item, variant) pair was already saved; the request
    /// is then a no-op.
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<Favorite>,
}

/// `GET /api/favorites`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Favorite>>>, ApiError> {
    let uid = require_uid(&session).await?;
    let favorites = state.shared.favorites_service.list(&uid).await?;
    Ok(Json(ApiResponse::success(favorites)))
}

/// `POST /api/favorites`
///
/// Mutation failures propagate: the caller needs to know a save did not
/// take effect.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(item): Json<NewFavorite>,
) -> Result<Json<ApiResponse<AddFavoriteOutcome>>, ApiError> {
    let uid = require_uid(&session).await?;
    let inserted = state.shared.favorites_service.add(&uid, &item).await?;

    Ok(Json(ApiResponse::success(AddFavoriteOutcome {
        created: inserted.is_some(),
        favorite: inserted,
    })))
}

/// `DELETE /api/favorites/{id}`
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let uid = require_uid(&session).await?;
    state.shared.favorites_service.remove(&uid, id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// `GET /api/favorites/stream`
///
/// Server-sent events: one `snapshot` event with the user's full favorites
/// list now, then one per change. The stream ends when the session is torn
/// down server-side.
pub async fn stream_favorites(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let uid = require_uid(&session).await?;
    let feed = state.shared.favorites_service.subscribe(&uid).await?;

    let stream = futures::stream::unfold((feed, true), |(mut feed, first)| async move {
        if !first && !feed.changed().await {
            return None;
        }

        let event = Event::default()
            .event("snapshot")
            .json_data(&feed.snapshot())
            .ok()?;

        Some((Ok::<_, Infallible>(event), (feed, false)))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
