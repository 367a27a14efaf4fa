//! TMDB (The Movie Database) metadata provider
//!
//! API Flow:
//! 1. Details: /movie/{id}?api_key=... → poster path, genres, overview
//!
//! Poster paths are relative; they are joined with the configured image base
//! to form a full URL.

use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MetadataResult, MovieMetadata, TmdbMovie},
    services::providers::MetadataProvider,
};

const NO_DESCRIPTION: &str = "No description available.";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_url: String,
    placeholder_poster: String,
}

impl TmdbProvider {
    /// Creates a provider with a bounded per-request timeout
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_url: String,
        placeholder_poster: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
            placeholder_poster,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_key().map(str::to_string),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.placeholder_poster.clone(),
            Duration::from_secs(config.metadata_timeout_secs),
        )
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Convert a TMDB details response into our metadata shape
    fn normalize(&self, movie: TmdbMovie) -> MovieMetadata {
        let poster_url = match movie.poster_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => format!("{}{}", self.image_url, path),
            None => self.placeholder_poster.clone(),
        };

        MovieMetadata {
            poster_url,
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            description: Some(
                movie
                    .overview
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            ),
        }
    }

    async fn request_details(&self, api_key: &str, external_id: i64) -> AppResult<TmdbMovie> {
        let url = format!("{}/movie/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}",
                status
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch(&self, external_id: i64) -> MetadataResult {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(external_id, "No TMDB API key configured, skipping fetch");
            return MetadataResult::Unavailable;
        };

        match self.request_details(api_key, external_id).await {
            Ok(movie) => {
                tracing::debug!(external_id, provider = "tmdb", "Metadata fetched");
                MetadataResult::Success(self.normalize(movie))
            }
            Err(e) => {
                tracing::warn!(
                    external_id,
                    error = %e,
                    provider = "tmdb",
                    "Metadata fetch failed"
                );
                MetadataResult::Unavailable
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
