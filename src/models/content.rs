use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::media::POSTER_BASE_URL;

/// Discriminator carried by every record flowing through the pipeline.
/// Stamped once at the normalization boundary, never inferred downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// Normalized metadata record produced fresh per TMDB response.
/// Movie and series payloads collapse onto the same shape so the trending
/// pipeline and every rendering path treat both variants uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i32,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub media_type: MediaType,
}

impl ContentItem {
    /// Full poster URL, or an empty string when the item has no poster.
    /// Empty string is what the counter store persists for posterless items.
    #[must_use]
    pub fn poster_url(&self) -> String {
        self.poster_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| format!("{POSTER_BASE_URL}{p}"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_round_trips_through_str() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("tv".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert_eq!(MediaType::Movie.to_string(), "movie");
        assert!("book".parse::<MediaType>().is_err());
    }

    #[test]
    fn poster_url_builds_from_path() {
        let item = ContentItem {
            id: 1,
            title: "Example".to_string(),
            poster_path: Some("/abc.jpg".to_string()),
            vote_average: None,
            release_date: None,
            overview: None,
            genres: vec![],
            media_type: MediaType::Movie,
        };
        assert_eq!(item.poster_url(), "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn poster_url_empty_when_missing() {
        let item = ContentItem {
            id: 1,
            title: "Example".to_string(),
            poster_path: None,
            vote_average: None,
            release_date: None,
            overview: None,
            genres: vec![],
            media_type: MediaType::Tv,
        };
        assert_eq!(item.poster_url(), "");
    }
}
