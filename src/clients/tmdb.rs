use std::collections::HashMap;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::TmdbConfig;
use crate::models::{ContentItem, MediaType};

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i32,
    pub name: String,
    pub logo_path: Option<String>,
}

/// Raw movie result as TMDB returns it.
#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: i32,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Raw series result. `name` and `first_air_date` take the place of the
/// movie fields; normalization folds both shapes onto [`ContentItem`].
#[derive(Debug, Deserialize)]
pub struct TvResult {
    pub id: i32,
    pub name: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl From<MovieResult> for ContentItem {
    fn from(raw: MovieResult) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            poster_path: raw.poster_path,
            vote_average: raw.vote_average,
            release_date: raw.release_date,
            overview: raw.overview,
            genres: raw.genre_ids.iter().map(ToString::to_string).collect(),
            media_type: MediaType::Movie,
        }
    }
}

impl From<TvResult> for ContentItem {
    fn from(raw: TvResult) -> Self {
        Self {
            id: raw.id,
            title: raw.name,
            poster_path: raw.poster_path,
            vote_average: raw.vote_average,
            release_date: raw.first_air_date,
            overview: raw.overview,
            genres: raw.genre_ids.iter().map(ToString::to_string).collect(),
            media_type: MediaType::Tv,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i32,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Extended movie record from the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub credits: Credits,
}

/// Extended series record from the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvDetails {
    pub id: i32,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub first_air_date: Option<String>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub credits: Credits,
}

/// TMDB v3 client. Every request carries the bearer token from config.
/// Non-success statuses fail the call with status and body; no retries.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(config: &TmdbConfig) -> Self {
        let client = Client::builder()
            .user_agent("Trendarr/1.0")
            .timeout(std::time::Duration::from_secs(
                config.request_timeout_seconds.into(),
            ))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_shared_client(client, config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &TmdbConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }

    /// First page of movies for `query`; an empty query switches to
    /// popularity-sorted discovery.
    pub async fn search_movies(&self, query: &str) -> Result<Vec<ContentItem>> {
        let url = if query.trim().is_empty() {
            format!("{}/discover/movie?sort_by=popularity.desc", self.base_url)
        } else {
            format!(
                "{}/search/movie?query={}",
                self.base_url,
                urlencoding::encode(query)
            )
        };

        let page: ResultsPage<MovieResult> = self.get_json(&url).await?;
        Ok(page.results.into_iter().map(ContentItem::from).collect())
    }

    /// First page of series for `query`; an empty query switches to
    /// popularity-sorted discovery.
    pub async fn search_tv(&self, query: &str) -> Result<Vec<ContentItem>> {
        let url = if query.trim().is_empty() {
            format!("{}/discover/tv?sort_by=popularity.desc", self.base_url)
        } else {
            format!(
                "{}/search/tv?query={}",
                self.base_url,
                urlencoding::encode(query)
            )
        };

        let page: ResultsPage<TvResult> = self.get_json(&url).await?;
        Ok(page.results.into_iter().map(ContentItem::from).collect())
    }

    pub async fn movie_details(&self, movie_id: i32) -> Result<Option<MovieDetails>> {
        let url = format!(
            "{}/movie/{}?append_to_response=credits",
            self.base_url, movie_id
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(Some(response.json().await?))
    }

    pub async fn tv_details(&self, tv_id: i32) -> Result<Option<TvDetails>> {
        let url = format!(
            "{}/tv/{}?append_to_response=credits",
            self.base_url, tv_id
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(Some(response.json().await?))
    }

    /// Full {id -> name} genre catalog for movies.
    pub async fn movie_genres(&self) -> Result<HashMap<i32, String>> {
        let url = format!("{}/genre/movie/list", self.base_url);
        let list: GenreList = self.get_json(&url).await?;
        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    /// Full {id -> name} genre catalog for series.
    pub async fn tv_genres(&self) -> Result<HashMap<i32, String>> {
        let url = format!("{}/genre/tv/list", self.base_url);
        let list: GenreList = self.get_json(&url).await?;
        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }
}
