use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::clients::tmdb::TmdbClient;
use crate::db::Store;
use crate::models::ContentItem;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("TMDB error: {0}")]
    Tmdb(String),
}

/// Combined movie+series search over the metadata API, plus the
/// fire-and-forget counter write for selected results.
pub struct SearchService {
    tmdb: Arc<TmdbClient>,
    store: Store,
}

impl SearchService {
    #[must_use]
    pub const fn new(tmdb: Arc<TmdbClient>, store: Store) -> Self {
        Self { tmdb, store }
    }

    /// Query both variants concurrently and rank the combined page by vote
    /// average, best first. Both requests run to completion before any
    /// failure is reported.
    pub async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SearchError> {
        let (movies, tv) = tokio::join!(
            self.tmdb.search_movies(query),
            self.tmdb.search_tv(query)
        );

        let mut combined = movies.map_err(|e| SearchError::Tmdb(e.to_string()))?;
        combined.extend(tv.map_err(|e| SearchError::Tmdb(e.to_string()))?);

        combined.sort_by(|a, b| {
            b.vote_average
                .unwrap_or(0.0)
                .total_cmp(&a.vote_average.unwrap_or(0.0))
        });

        Ok(combined)
    }

    /// Bump the search counter for a result the user selected. Failures are
    /// logged and swallowed; the originating search must never be blocked or
    /// failed by a counter write.
    pub async fn record_selection(&self, term: &str, item: &ContentItem) {
        match self.store.record_search(term, item).await {
            Ok(()) => {
                metrics::counter!(
                    "trendarr_search_events_total",
                    "media_type" => item.media_type.to_string()
                )
                .increment(1);
            }
            Err(e) => {
                metrics::counter!("trendarr_counter_write_failures_total").increment(1);
                error!("Failed to update search count: {e:#}");
            }
        }
    }
}
