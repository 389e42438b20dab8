use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{movie_metrics, tv_metrics};
use crate::models::{ContentItem, CounterRecord, MediaType};

impl From<movie_metrics::Model> for CounterRecord {
    fn from(model: movie_metrics::Model) -> Self {
        Self {
            content_id: model.movie_id,
            title: model.title,
            poster_url: model.poster_url,
            count: model.count,
        }
    }
}

impl From<tv_metrics::Model> for CounterRecord {
    fn from(model: tv_metrics::Model) -> Self {
        Self {
            content_id: model.tv_id,
            title: model.title,
            poster_url: model.poster_url,
            count: model.count,
        }
    }
}

/// Accessor for the two per-variant search-counter collections.
///
/// Increments are read-then-write with no transactional guard: two clients
/// racing the same (term, content) pair can lose an increment. Known
/// weakness, kept to match the store's consistency model (last writer wins
/// per counter document).
pub struct MetricsRepository {
    conn: DatabaseConnection,
}

impl MetricsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Bump the counter for `term` in the collection selected by the item's
    /// variant: increment the first row matching the exact term, or create
    /// one with count 1.
    pub async fn record_search(&self, term: &str, item: &ContentItem) -> Result<()> {
        match item.media_type {
            MediaType::Movie => self.record_movie_search(term, item).await,
            MediaType::Tv => self.record_tv_search(term, item).await,
        }
    }

    async fn record_movie_search(&self, term: &str, item: &ContentItem) -> Result<()> {
        let existing = movie_metrics::Entity::find()
            .filter(movie_metrics::Column::SearchTerm.eq(term))
            .order_by_asc(movie_metrics::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query movie counter by search term")?;

        if let Some(row) = existing {
            let count = row.count;
            let mut active: movie_metrics::ActiveModel = row.into();
            active.count = Set(count + 1);
            active
                .update(&self.conn)
                .await
                .context("Failed to increment movie counter")?;
        } else {
            let active = movie_metrics::ActiveModel {
                search_term: Set(term.to_string()),
                movie_id: Set(Some(item.id)),
                title: Set(item.title.clone()),
                poster_url: Set(item.poster_url()),
                count: Set(1),
                ..Default::default()
            };
            active
                .insert(&self.conn)
                .await
                .context("Failed to insert movie counter")?;
        }

        Ok(())
    }

    async fn record_tv_search(&self, term: &str, item: &ContentItem) -> Result<()> {
        let existing = tv_metrics::Entity::find()
            .filter(tv_metrics::Column::SearchTerm.eq(term))
            .order_by_asc(tv_metrics::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query tv counter by search term")?;

        if let Some(row) = existing {
            let count = row.count;
            let mut active: tv_metrics::ActiveModel = row.into();
            active.count = Set(count + 1);
            active
                .update(&self.conn)
                .await
                .context("Failed to increment tv counter")?;
        } else {
            let active = tv_metrics::ActiveModel {
                search_term: Set(term.to_string()),
                tv_id: Set(Some(item.id)),
                title: Set(item.title.clone()),
                poster_url: Set(item.poster_url()),
                count: Set(1),
                ..Default::default()
            };
            active
                .insert(&self.conn)
                .await
                .context("Failed to insert tv counter")?;
        }

        Ok(())
    }

    /// Every counter row for one variant, unfiltered and unpaginated.
    pub async fn list_counters(&self, media_type: MediaType) -> Result<Vec<CounterRecord>> {
        match media_type {
            MediaType::Movie => {
                let rows = movie_metrics::Entity::find()
                    .order_by_asc(movie_metrics::Column::Id)
                    .all(&self.conn)
                    .await
                    .context("Failed to list movie counters")?;
                Ok(rows.into_iter().map(CounterRecord::from).collect())
            }
            MediaType::Tv => {
                let rows = tv_metrics::Entity::find()
                    .order_by_asc(tv_metrics::Column::Id)
                    .all(&self.conn)
                    .await
                    .context("Failed to list tv counters")?;
                Ok(rows.into_iter().map(CounterRecord::from).collect())
            }
        }
    }
}
