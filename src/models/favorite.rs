use serde::{Deserialize, Serialize};

use super::content::MediaType;

/// Per-user favorite as held by the store. The store assigns `id`;
/// `saved_at` is generated at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i32,
    pub user_id: String,
    pub item_id: i32,
    pub media_type: MediaType,
    pub title: String,
    pub poster: Option<String>,
    pub saved_at: String,
}

/// Caller-supplied fields for a new favorite. Everything else is assigned
/// by the accessor.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFavorite {
    pub item_id: i32,
    pub media_type: MediaType,
    pub title: String,
    pub poster: Option<String>,
}
