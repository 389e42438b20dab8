//! Trending aggregation: merge counter records by content identity, sum
//! counts, rank, truncate.

use std::collections::HashMap;

use thiserror::Error;

use crate::constants::limits;
use crate::db::Store;
use crate::models::{CounterRecord, MediaType, TrendingEntry};

#[derive(Debug, Error)]
pub enum TrendingError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for TrendingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Merge counter records sharing a content identity, sum their counts, sort
/// descending and truncate to `limit`.
///
/// The first record seen for an identity contributes the title and poster;
/// later duplicates only add their counts. The sort is stable, so entries
/// with equal counts keep their first-seen order. Records without an
/// identifier are skipped. Counts are summed as-is, with no validation of
/// zero or negative values.
#[must_use]
pub fn aggregate(
    records: Vec<CounterRecord>,
    media_type: MediaType,
    limit: usize,
) -> Vec<TrendingEntry> {
    let mut entries: Vec<TrendingEntry> = Vec::new();
    let mut by_id: HashMap<i32, usize> = HashMap::new();

    for record in records {
        let Some(id) = record.content_id else {
            continue;
        };

        if let Some(&slot) = by_id.get(&id) {
            entries[slot].count += record.count;
        } else {
            by_id.insert(id, entries.len());
            entries.push(TrendingEntry {
                id,
                media_type,
                title: record.title,
                poster_url: record.poster_url,
                count: record.count,
            });
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

/// Read-side service: pulls every counter row for a variant and reduces it
/// to a ranked top-N. Nothing is cached or persisted; every call recomputes
/// from the store.
pub struct TrendingService {
    store: Store,
}

impl TrendingService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Top entries for the carousel and search preview.
    pub async fn carousel(&self, media_type: MediaType) -> Result<Vec<TrendingEntry>, TrendingError> {
        self.top(media_type, limits::CAROUSEL_TRENDING).await
    }

    /// Top entries for full list views.
    pub async fn list(&self, media_type: MediaType) -> Result<Vec<TrendingEntry>, TrendingError> {
        self.top(media_type, limits::LIST_TRENDING).await
    }

    pub async fn top(
        &self,
        media_type: MediaType,
        limit: usize,
    ) -> Result<Vec<TrendingEntry>, TrendingError> {
        let records = self.store.list_counters(media_type).await?;

        metrics::counter!(
            "trendarr_trending_reads_total",
            "media_type" => media_type.to_string()
        )
        .increment(1);

        Ok(aggregate(records, media_type, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, count: i64, title: &str) -> CounterRecord {
        CounterRecord {
            content_id: Some(id),
            title: title.to_string(),
            poster_url: format!("https://image.tmdb.org/t/p/w500/{id}.jpg"),
            count,
        }
    }

    #[test]
    fn merges_duplicates_and_sums_counts() {
        let records = vec![record(5, 3, "Five"), record(5, 2, "Five again"), record(7, 10, "Seven")];

        let entries = aggregate(records, MediaType::Movie, 6);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 7);
        assert_eq!(entries[0].count, 10);
        assert_eq!(entries[1].id, 5);
        assert_eq!(entries[1].count, 5);
    }

    #[test]
    fn keeps_first_seen_title_and_poster() {
        let records = vec![record(5, 1, "First title"), record(5, 4, "Second title")];

        let entries = aggregate(records, MediaType::Tv, 6);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "First title");
        assert_eq!(entries[0].count, 5);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let entries = aggregate(Vec::new(), MediaType::Movie, 6);
        assert!(entries.is_empty());
    }

    #[test]
    fn truncates_to_limit() {
        let records = (0..20).map(|i| record(i, i64::from(i) + 1, "t")).collect();
        let entries = aggregate(records, MediaType::Movie, 6);
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn sorted_non_increasing() {
        let records = vec![
            record(1, 4, "a"),
            record(2, 9, "b"),
            record(3, 1, "c"),
            record(4, 9, "d"),
        ];
        let entries = aggregate(records, MediaType::Movie, 30);

        for pair in entries.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![record(2, 9, "b"), record(4, 9, "d"), record(1, 9, "a")];
        let entries = aggregate(records, MediaType::Movie, 30);

        let ids: Vec<i32> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn idempotent_on_deduplicated_input() {
        let records = vec![record(5, 3, "a"), record(5, 2, "a"), record(7, 10, "c")];
        let first = aggregate(records, MediaType::Movie, 30);

        let again: Vec<CounterRecord> = first
            .iter()
            .map(|e| CounterRecord {
                content_id: Some(e.id),
                title: e.title.clone(),
                poster_url: e.poster_url.clone(),
                count: e.count,
            })
            .collect();
        let second = aggregate(again, MediaType::Movie, 30);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.count, b.count);
        }
    }

    #[test]
    fn skips_records_without_identity() {
        let records = vec![
            CounterRecord {
                content_id: None,
                title: "orphan".to_string(),
                poster_url: String::new(),
                count: 99,
            },
            record(1, 2, "a"),
        ];

        let entries = aggregate(records, MediaType::Movie, 6);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 1);
    }

    #[test]
    fn zero_and_negative_counts_propagate() {
        let records = vec![record(1, 0, "zero"), record(1, -2, "neg"), record(2, 1, "one")];
        let entries = aggregate(records, MediaType::Movie, 6);

        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[1].id, 1);
        assert_eq!(entries[1].count, -2);
    }
}
