use serde::{Deserialize, Serialize};

use super::content::MediaType;

/// Read-through copy of one counter document, variant-agnostic. The variant
/// is implied by which collection the record came out of.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Content identifier. `None` mirrors a document missing the field;
    /// the aggregator skips such records.
    pub content_id: Option<i32>,
    pub title: String,
    pub poster_url: String,
    pub count: i64,
}

/// Derived, in-memory trending aggregate. One entry per content identity,
/// its count summed across every counter row that shares the identity.
/// Recomputed on every read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: i32,
    pub media_type: MediaType,
    /// Title snapshot from the first counter row seen for this identity.
    pub title: String,
    /// Poster URL snapshot; empty string when the item had no poster.
    pub poster_url: String,
    pub count: i64,
}
