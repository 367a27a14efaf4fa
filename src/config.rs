use serde::Deserialize;
use std::path::PathBuf;

/// Placeholder poster shown when metadata cannot be fetched
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/500x750/1a0b3d/a855f7?text=No+Image+Available";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. When unset every metadata lookup degrades to placeholders.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a TMDB `poster_path` to form the poster URL
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Upper bound on a single metadata request, in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    #[serde(default = "default_placeholder_poster")]
    pub placeholder_poster: String,

    /// Catalog snapshot (JSON array of `{movie_id, title}`)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Similarity matrix: a single JSON file or a directory of numbered chunks
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS, comma separated
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Recommendations returned when the request has no `count`
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Hard cap on `count`, bounding the metadata fan-out per request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    10
}

fn default_placeholder_poster() -> String {
    PLACEHOLDER_POSTER.to_string()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendations() -> usize {
    8
}

fn default_max_recommendations() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.tmdb_api_key, None);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.metadata_timeout_secs, 10);
        assert_eq!(config.placeholder_poster, PLACEHOLDER_POSTER);
        assert_eq!(config.catalog_path, PathBuf::from("data/movies.json"));
        assert_eq!(config.default_recommendations, 8);
        assert_eq!(config.max_recommendations, 50);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("TMDB_API_KEY", "secret"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example,https://b.example"),
            ("SIMILARITY_PATH", "/srv/sim"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.similarity_path, PathBuf::from("/srv/sim"));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config::from_vars(vars(&[("TMDB_API_KEY", "  ")])).unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
