use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::clients::tmdb::TmdbClient;
use crate::models::{ContentItem, MediaType, TrendingEntry};
use crate::services::trending::TrendingService;

#[derive(Debug, Error)]
pub enum OverviewError {
    #[error("{0}")]
    Fetch(String),
}

/// One home-screen refresh worth of data.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub trending_movies: Vec<TrendingEntry>,
    pub trending_tv: Vec<TrendingEntry>,
    pub latest_movies: Vec<ContentItem>,
    pub latest_tv: Vec<ContentItem>,
}

/// Assembles the home surface from its four independent sections.
pub struct OverviewService {
    tmdb: Arc<TmdbClient>,
    trending: Arc<TrendingService>,
}

impl OverviewService {
    #[must_use]
    pub const fn new(tmdb: Arc<TmdbClient>, trending: Arc<TrendingService>) -> Self {
        Self { tmdb, trending }
    }

    /// Issue all four section fetches concurrently and let every one settle.
    /// The first failure wins for reporting; partial results are discarded
    /// rather than surfaced, matching the combined error state the consumer
    /// renders.
    pub async fn home(&self) -> Result<Overview, OverviewError> {
        let (trending_movies, trending_tv, latest_movies, latest_tv) = tokio::join!(
            self.trending.carousel(MediaType::Movie),
            self.trending.carousel(MediaType::Tv),
            self.tmdb.search_movies(""),
            self.tmdb.search_tv(""),
        );

        let mut first_error: Option<String> = None;

        let trending_movies = settle(trending_movies.map_err(|e| e.to_string()), &mut first_error);
        let trending_tv = settle(trending_tv.map_err(|e| e.to_string()), &mut first_error);
        let latest_movies = settle(latest_movies.map_err(|e| e.to_string()), &mut first_error);
        let latest_tv = settle(latest_tv.map_err(|e| e.to_string()), &mut first_error);

        if let Some(message) = first_error {
            return Err(OverviewError::Fetch(message));
        }

        Ok(Overview {
            trending_movies,
            trending_tv,
            latest_movies,
            latest_tv,
        })
    }
}

fn settle<T>(result: Result<Vec<T>, String>, first_error: &mut Option<String>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(message) => {
            if first_error.is_none() {
                *first_error = Some(message);
            }
            Vec::new()
        }
    }
}
