use crate::error::{AppError, AppResult};

/// Dense N×N similarity matrix stored row-major
///
/// Row `i` holds the similarity of catalog entry `i` to every entry `j`,
/// including itself. Symmetry is not assumed.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    dimension: usize,
    scores: Vec<f64>,
}

impl SimilarityIndex {
    /// Builds the index from rows in order
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        Self::from_chunks(vec![rows])
    }

    /// Concatenates row chunks in the given order
    ///
    /// Chunk boundaries carry no meaning: the result is the same as if every
    /// row had come from a single chunk.
    pub fn from_chunks(chunks: Vec<Vec<Vec<f64>>>) -> AppResult<Self> {
        let dimension: usize = chunks.iter().map(Vec::len).sum();
        // Grown row by row so a malformed matrix fails before a large allocation
        let mut scores = Vec::new();

        let rows = chunks.into_iter().flatten();
        for (row_index, row) in rows.enumerate() {
            if row.len() != dimension {
                return Err(AppError::Snapshot(format!(
                    "similarity row {} has {} columns, expected {}",
                    row_index,
                    row.len(),
                    dimension
                )));
            }
            if let Some(col) = row.iter().position(|s| !s.is_finite()) {
                return Err(AppError::Snapshot(format!(
                    "similarity row {} has a non-finite score at column {}",
                    row_index, col
                )));
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn row_for(&self, row_index: usize) -> AppResult<&[f64]> {
        if row_index >= self.dimension {
            return Err(AppError::IndexOutOfRange {
                index: row_index,
                len: self.dimension,
            });
        }
        let start = row_index * self.dimension;
        Ok(&self.scores[start..start + self.dimension])
    }

    /// Rows whose diagonal entry is not the row maximum
    pub fn rows_without_maximal_self(&self) -> Vec<usize> {
        (0..self.dimension)
            .filter(|&i| {
                let row = &self.scores[i * self.dimension..(i + 1) * self.dimension];
                row.iter().any(|&s| s > row[i])
            })
            .collect()
    }
}
