//! Movie metadata provider abstraction
//!
//! Providers turn an external movie id into poster, genre and synopsis data.
//! They never fail outward: every error collapses into
//! `MetadataResult::Unavailable` so callers can always fill in placeholders.

use crate::models::MetadataResult;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for external movie metadata sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for a movie by its external id
    async fn fetch(&self, external_id: i64) -> MetadataResult;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
