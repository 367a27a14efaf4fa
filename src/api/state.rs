use std::sync::Arc;

use crate::{
    config::Config,
    db::Snapshot,
    services::{MetadataEnricher, MetadataProvider, Recommender},
};

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub enricher: MetadataEnricher,
    pub limits: RecommendationLimits,
}

/// Bounds applied to the `count` query parameter
#[derive(Debug, Clone, Copy)]
pub struct RecommendationLimits {
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            default_count: 8,
            max_count: 50,
        }
    }
}

impl RecommendationLimits {
    /// Resolves a requested count; negative counts mean "none"
    pub fn resolve(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_count.min(self.max_count),
            Some(n) if n <= 0 => 0,
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX).min(self.max_count),
        }
    }
}

impl AppState {
    pub fn new(
        snapshot: Arc<Snapshot>,
        provider: Arc<dyn MetadataProvider>,
        placeholder_poster: String,
        limits: RecommendationLimits,
    ) -> Self {
        Self {
            recommender: Recommender::new(snapshot),
            enricher: MetadataEnricher::new(provider, placeholder_poster),
            limits,
        }
    }

    /// Builds the state from loaded configuration
    pub fn from_config(
        config: &Config,
        snapshot: Arc<Snapshot>,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self::new(
            snapshot,
            provider,
            config.placeholder_poster.clone(),
            RecommendationLimits {
                default_count: config.default_recommendations,
                max_count: config.max_recommendations,
            },
        )
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.recommender.snapshot()
    }
}
