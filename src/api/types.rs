use serde::{Deserialize, Serialize};

use crate::constants::media::{PLACEHOLDER_POSTER, PLACEHOLDER_TITLE};
use crate::models::{ContentItem, MediaType, TrendingEntry};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Trending entry as rendered: the placeholders for missing title/poster
/// are substituted here, at the presentation boundary, never inside the
/// aggregator.
#[derive(Debug, Serialize)]
pub struct TrendingDto {
    pub id: i32,
    pub media_type: MediaType,
    pub title: String,
    pub poster_url: String,
    pub count: i64,
}

impl From<TrendingEntry> for TrendingDto {
    fn from(entry: TrendingEntry) -> Self {
        let title = if entry.title.trim().is_empty() {
            PLACEHOLDER_TITLE.to_string()
        } else {
            entry.title
        };
        let poster_url = if entry.poster_url.trim().is_empty() {
            PLACEHOLDER_POSTER.to_string()
        } else {
            entry.poster_url
        };

        Self {
            id: entry.id,
            media_type: entry.media_type,
            title,
            poster_url,
            count: entry.count,
        }
    }
}

/// Search result with genre identifiers resolved to display names.
#[derive(Debug, Serialize)]
pub struct SearchResultDto {
    pub id: i32,
    pub title: String,
    pub poster_path: Option<String>,
    pub poster_url: String,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub media_type: MediaType,
}

impl SearchResultDto {
    pub fn from_item(item: ContentItem, genre_names: Vec<String>) -> Self {
        let poster_url = item.poster_url();
        Self {
            id: item.id,
            title: item.title,
            poster_path: item.poster_path,
            poster_url,
            vote_average: item.vote_average,
            release_date: item.release_date,
            overview: item.overview,
            genres: genre_names,
            media_type: item.media_type,
        }
    }
}

/// Body for `POST /api/search/select`: the result the user picked out of a
/// search, with the term that found it.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub term: String,
    pub item: ContentItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_dto_substitutes_placeholders() {
        let entry = TrendingEntry {
            id: 1,
            media_type: MediaType::Movie,
            title: String::new(),
            poster_url: String::new(),
            count: 3,
        };

        let dto = TrendingDto::from(entry);
        assert_eq!(dto.title, "Untitled");
        assert_eq!(dto.poster_url, PLACEHOLDER_POSTER);
    }

    #[test]
    fn trending_dto_keeps_real_values() {
        let entry = TrendingEntry {
            id: 1,
            media_type: MediaType::Tv,
            title: "Foo".to_string(),
            poster_url: "https://image.tmdb.org/t/p/w500/foo.jpg".to_string(),
            count: 3,
        };

        let dto = TrendingDto::from(entry);
        assert_eq!(dto.title, "Foo");
        assert_eq!(dto.poster_url, "https://image.tmdb.org/t/p/w500/foo.jpg");
    }
}
