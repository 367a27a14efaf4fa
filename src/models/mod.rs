use serde::{Deserialize, Serialize};

/// A movie known to the catalog
///
/// `row_index` is the position in the catalog snapshot and doubles as the
/// row/column index into the similarity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub row_index: usize,
    pub title: String,
    /// Identifier in the TMDB namespace
    pub external_id: i64,
}

/// Normalized metadata for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub poster_url: String,
    pub genres: Vec<String>,
    pub description: Option<String>,
}

impl MovieMetadata {
    /// Metadata used when the external lookup is unavailable
    pub fn placeholder(poster_url: &str) -> Self {
        Self {
            poster_url: poster_url.to_string(),
            genres: Vec::new(),
            description: None,
        }
    }
}

/// Outcome of an external metadata lookup
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataResult {
    Success(MovieMetadata),
    /// Network failure, timeout, non-2xx status, bad body or missing credential
    Unavailable,
}

impl MetadataResult {
    pub fn is_available(&self) -> bool {
        matches!(self, MetadataResult::Success(_))
    }

    /// Collapses `Unavailable` into placeholder metadata
    pub fn or_placeholder(self, poster_url: &str) -> MovieMetadata {
        match self {
            MetadataResult::Success(metadata) => metadata,
            MetadataResult::Unavailable => MovieMetadata::placeholder(poster_url),
        }
    }
}

/// Movie as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genres: Vec<String>,
    pub poster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Movie {
    pub fn from_parts(entry: &CatalogEntry, metadata: MovieMetadata) -> Self {
        Self {
            id: entry.external_id.to_string(),
            title: entry.title.clone(),
            genres: metadata.genres,
            poster: metadata.poster_url,
            description: metadata.description,
        }
    }

    /// Drops the synopsis, as recommendation lists do not carry it
    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieList {
    pub movies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Movie>,
}

// ============================================================================
// Snapshot Types
// ============================================================================

/// One row of the catalog snapshot file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogRecord {
    pub movie_id: i64,
    pub title: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from TMDB `GET /movie/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}
