use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    db::{CatalogStore, SimilarityIndex},
    error::{AppError, AppResult},
    models::CatalogRecord,
};

/// Catalog and similarity matrix loaded together at startup
///
/// Row `i` of the matrix belongs to catalog entry `i`; `Snapshot::new`
/// refuses any pair that does not line up.
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: CatalogStore,
    pub similarity: SimilarityIndex,
}

impl Snapshot {
    pub fn new(catalog: CatalogStore, similarity: SimilarityIndex) -> AppResult<Self> {
        if catalog.is_empty() {
            return Err(AppError::Snapshot("catalog is empty".to_string()));
        }
        if similarity.dimension() != catalog.len() {
            return Err(AppError::Snapshot(format!(
                "similarity matrix has {} rows but catalog has {} entries",
                similarity.dimension(),
                catalog.len()
            )));
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Loads the catalog file and the similarity file or chunk directory
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let catalog = load_catalog(catalog_path)?;
        tracing::info!(
            path = %catalog_path.display(),
            entries = catalog.len(),
            "Loaded catalog"
        );

        let duplicates = catalog.duplicate_titles();
        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "Catalog contains repeated titles; lookups resolve to the first row"
            );
        }

        let chunk_paths = similarity_chunk_paths(similarity_path)?;
        let mut chunks = Vec::with_capacity(chunk_paths.len());
        for path in &chunk_paths {
            let rows: Vec<Vec<f64>> = read_json(path)?;
            tracing::debug!(path = %path.display(), rows = rows.len(), "Read similarity chunk");
            chunks.push(rows);
        }
        let similarity = SimilarityIndex::from_chunks(chunks)?;
        tracing::info!(
            path = %similarity_path.display(),
            chunks = chunk_paths.len(),
            dimension = similarity.dimension(),
            "Loaded similarity matrix"
        );

        let odd_rows = similarity.rows_without_maximal_self();
        if !odd_rows.is_empty() {
            tracing::warn!(
                rows = odd_rows.len(),
                first = odd_rows[0],
                "Similarity rows where self-similarity is not the maximum"
            );
        }

        Self::new(catalog, similarity)
    }
}

/// Reads the catalog snapshot, a JSON array of `{movie_id, title}` records
pub fn load_catalog(path: &Path) -> AppResult<CatalogStore> {
    let records: Vec<CatalogRecord> = read_json(path)?;
    Ok(CatalogStore::from_records(records))
}

/// Resolves the similarity path to the ordered list of files to read
///
/// A file is a single chunk. A directory contributes every `<stem>_<n>.json`
/// file, ordered by `n` numerically. All chunks must share one stem.
pub fn similarity_chunk_paths(path: &Path) -> AppResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(AppError::Snapshot(format!(
            "similarity path {} does not exist",
            path.display()
        )));
    }

    let mut stem: Option<String> = None;
    let mut numbered = Vec::new();
    for dir_entry in fs::read_dir(path)? {
        let file = dir_entry?.path();
        let Some((file_stem, n)) = chunk_name(&file) else {
            continue;
        };
        match &stem {
            Some(expected) if *expected != file_stem => {
                return Err(AppError::Snapshot(format!(
                    "mixed similarity chunk stems in {}: {} and {}",
                    path.display(),
                    expected,
                    file_stem
                )));
            }
            Some(_) => {}
            None => stem = Some(file_stem),
        }
        numbered.push((n, file));
    }

    if numbered.is_empty() {
        return Err(AppError::Snapshot(format!(
            "no similarity chunks found in {}",
            path.display()
        )));
    }

    numbered.sort_by_key(|(n, _)| *n);
    if let Some(pair) = numbered.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(AppError::Snapshot(format!(
            "similarity chunk {} appears more than once ({} and {})",
            pair[0].0,
            pair[0].1.display(),
            pair[1].1.display()
        )));
    }

    Ok(numbered.into_iter().map(|(_, file)| file).collect())
}

/// `similarity_12.json` -> `Some(("similarity", 12))`
fn chunk_name(file: &Path) -> Option<(String, u32)> {
    if file.extension()? != "json" {
        return None;
    }
    let stem = file.file_stem()?.to_str()?;
    let (prefix, suffix) = stem.rsplit_once('_')?;
    Some((prefix.to_string(), suffix.parse().ok()?))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::Snapshot(format!("failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Snapshot(format!("failed to parse {}: {}", path.display(), e)))
}
