use std::sync::Arc;

use crate::{
    models::{MetadataResult, MovieMetadata},
    services::providers::MetadataProvider,
};

/// Fills in movie metadata from a provider, masking failures with placeholders
#[derive(Clone)]
pub struct MetadataEnricher {
    provider: Arc<dyn MetadataProvider>,
    placeholder_poster: String,
}

impl MetadataEnricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, placeholder_poster: String) -> Self {
        Self {
            provider,
            placeholder_poster,
        }
    }

    pub fn placeholder_poster(&self) -> &str {
        &self.placeholder_poster
    }

    /// Raw provider lookup, `Unavailable` on any failure
    pub async fn fetch(&self, external_id: i64) -> MetadataResult {
        self.provider.fetch(external_id).await
    }

    /// Metadata for one movie, placeholders when unavailable
    pub async fn enrich(&self, external_id: i64) -> MovieMetadata {
        self.fetch(external_id)
            .await
            .or_placeholder(&self.placeholder_poster)
    }

    /// Fetches metadata for every id concurrently
    ///
    /// The output has one element per input id, in input order, regardless of
    /// the order in which fetches complete.
    pub async fn enrich_many(&self, external_ids: &[i64]) -> Vec<MovieMetadata> {
        let mut tasks = Vec::with_capacity(external_ids.len());

        for &external_id in external_ids {
            let provider = Arc::clone(&self.provider);
            let task = tokio::spawn(async move { provider.fetch(external_id).await });
            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        let mut unavailable = 0;

        for task in tasks {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Metadata task join error");
                    MetadataResult::Unavailable
                }
            };
            if !result.is_available() {
                unavailable += 1;
            }
            results.push(result.or_placeholder(&self.placeholder_poster));
        }

        if unavailable > 0 {
            tracing::warn!(
                requested = external_ids.len(),
                unavailable,
                "Substituted placeholder metadata"
            );
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMetadataProvider;
    use mockall::predicate::eq;
    use std::time::Duration;

    const PLACEHOLDER: &str = "https://placeholder.test/none.png";

    fn metadata(id: i64) -> MovieMetadata {
        MovieMetadata {
            poster_url: format!("https://img.test/{}.jpg", id),
            genres: vec!["Drama".to_string()],
            description: Some(format!("Movie {}", id)),
        }
    }

    fn enricher(mock: MockMetadataProvider) -> MetadataEnricher {
        MetadataEnricher::new(Arc::new(mock), PLACEHOLDER.to_string())
    }

    #[tokio::test]
    async fn test_enrich_success() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch()
            .with(eq(42))
            .times(1)
            .returning(|id| MetadataResult::Success(metadata(id)));

        let result = enricher(mock).enrich(42).await;
        assert_eq!(result, metadata(42));
    }

    #[tokio::test]
    async fn test_enrich_unavailable_uses_placeholder() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch()
            .returning(|_| MetadataResult::Unavailable);

        let result = enricher(mock).enrich(7).await;
        assert_eq!(result.poster_url, PLACEHOLDER);
        assert!(result.genres.is_empty());
        assert_eq!(result.description, None);
    }

    #[tokio::test]
    async fn test_fetch_passes_through() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch()
            .returning(|_| MetadataResult::Unavailable);

        assert_eq!(enricher(mock).fetch(7).await, MetadataResult::Unavailable);
    }

    #[tokio::test]
    async fn test_enrich_many_keeps_input_order() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_fetch()
            .times(4)
            .returning(|id| {
                if id == 3 {
                    MetadataResult::Unavailable
                } else {
                    MetadataResult::Success(metadata(id))
                }
            });

        let results = enricher(mock).enrich_many(&[5, 1, 3, 9]).await;
        assert_eq!(results.len(), 4);
        assert_eq!(results[0], metadata(5));
        assert_eq!(results[1], metadata(1));
        assert_eq!(results[2].poster_url, PLACEHOLDER);
        assert_eq!(results[3], metadata(9));
    }

    #[tokio::test]
    async fn test_enrich_many_empty() {
        let mock = MockMetadataProvider::new();
        assert!(enricher(mock).enrich_many(&[]).await.is_empty());
    }

    /// Provider whose latency shrinks with the id, so later ids finish first
    struct ReverseLatencyProvider;

    #[async_trait::async_trait]
    impl MetadataProvider for ReverseLatencyProvider {
        async fn fetch(&self, external_id: i64) -> MetadataResult {
            tokio::time::sleep(Duration::from_millis(10 * (5 - external_id as u64))).await;
            MetadataResult::Success(metadata(external_id))
        }

        fn name(&self) -> &'static str {
            "reverse-latency"
        }
    }

    #[tokio::test]
    async fn test_enrich_many_order_independent_of_completion() {
        let enricher = MetadataEnricher::new(Arc::new(ReverseLatencyProvider), PLACEHOLDER.to_string());
        let results = enricher.enrich_many(&[1, 2, 3, 4]).await;
        let posters: Vec<&str> = results.iter().map(|m| m.poster_url.as_str()).collect();
        assert_eq!(
            posters,
            vec![
                "https://img.test/1.jpg",
                "https://img.test/2.jpg",
                "https://img.test/3.jpg",
                "https://img.test/4.jpg",
            ]
        );
    }
}
