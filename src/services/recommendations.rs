use std::sync::Arc;

use crate::{db::Snapshot, error::AppResult, models::CatalogEntry};

/// Neighbors returned when the caller does not ask for a specific count
pub const DEFAULT_TOP_N: usize = 5;

/// Ranks catalog entries by precomputed similarity to a query title
#[derive(Debug, Clone)]
pub struct Recommender {
    snapshot: Arc<Snapshot>,
}

impl Recommender {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns up to `top_n` entries most similar to `title`
    ///
    /// Scores are ordered descending; equal scores keep ascending row order.
    /// The query's own row is excluded by index rather than by position, so a
    /// snapshot where another movie ties or beats self-similarity still drops
    /// the right entry. Fails with `NotFound` when the title is unknown.
    pub fn recommend(&self, title: &str, top_n: usize) -> AppResult<Vec<&CatalogEntry>> {
        let catalog = &self.snapshot.catalog;
        let query = catalog.find_by_title(title)?;
        let row = self.snapshot.similarity.row_for(query.row_index)?;

        let ranked = rank_row(row, query.row_index, top_n);

        tracing::debug!(
            title = %title,
            row_index = query.row_index,
            requested = top_n,
            returned = ranked.len(),
            "Ranked similarity row"
        );

        // A validated snapshot has one catalog entry per matrix column
        Ok(ranked
            .into_iter()
            .filter_map(|(row_index, _)| catalog.get(row_index))
            .collect())
    }
}

/// Top `top_n` `(row_index, score)` pairs of `row`, skipping `exclude`
pub fn rank_row(row: &[f64], exclude: usize, top_n: usize) -> Vec<(usize, f64)> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut pairs: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    // sort_by is stable, so ties stay in ascending row order
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));

    pairs
        .into_iter()
        .filter(|&(row_index, _)| row_index != exclude)
        .take(top_n)
        .collect()
}
