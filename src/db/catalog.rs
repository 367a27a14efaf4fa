use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, CatalogRecord},
};

/// Read-only catalog of known movies
///
/// Entries keep snapshot file order; an entry's position is its `row_index`.
/// Title and external id lookups go through indexes built once at load, which
/// keep the first row for any duplicated key.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    by_title: HashMap<String, usize>,
    by_external_id: HashMap<i64, usize>,
}

impl CatalogStore {
    /// Builds the store from snapshot records in file order
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut by_title = HashMap::with_capacity(records.len());
        let mut by_external_id = HashMap::with_capacity(records.len());

        for (row_index, record) in records.into_iter().enumerate() {
            by_title.entry(record.title.clone()).or_insert(row_index);
            by_external_id.entry(record.movie_id).or_insert(row_index);
            entries.push(CatalogEntry {
                row_index,
                title: record.title,
                external_id: record.movie_id,
            });
        }

        Self {
            entries,
            by_title,
            by_external_id,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of rows whose title repeats an earlier row
    pub fn duplicate_titles(&self) -> usize {
        self.entries.len() - self.by_title.len()
    }

    /// All titles in row order
    pub fn list_titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// Direct positional access
    pub fn get(&self, row_index: usize) -> Option<&CatalogEntry> {
        self.entries.get(row_index)
    }

    /// Exact, case- and whitespace-sensitive title lookup
    pub fn find_by_title(&self, title: &str) -> AppResult<&CatalogEntry> {
        self.by_title
            .get(title)
            .map(|&row| &self.entries[row])
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
    }

    pub fn find_by_external_id(&self, external_id: i64) -> AppResult<&CatalogEntry> {
        self.by_external_id
            .get(&external_id)
            .map(|&row| &self.entries[row])
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", external_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(movie_id: i64, title: &str) -> CatalogRecord {
        CatalogRecord {
            movie_id,
            title: title.to_string(),
        }
    }

    fn create_test_store() -> CatalogStore {
        CatalogStore::from_records(vec![
            record(19995, "Avatar"),
            record(27205, "Inception"),
            record(155, "The Dark Knight"),
        ])
    }

    #[test]
    fn test_list_titles_in_row_order() {
        let store = create_test_store();
        assert_eq!(
            store.list_titles(),
            vec!["Avatar", "Inception", "The Dark Knight"]
        );
    }

    #[test]
    fn test_row_index_matches_position() {
        let store = create_test_store();
        for (i, entry) in store.entries().iter().enumerate() {
            assert_eq!(entry.row_index, i);
        }
    }

    #[test]
    fn test_find_by_title_found() {
        let store = create_test_store();
        let entry = store.find_by_title("Inception").unwrap();
        assert_eq!(entry.row_index, 1);
        assert_eq!(entry.external_id, 27205);
    }

    #[test]
    fn test_find_by_title_is_exact() {
        let store = create_test_store();
        assert!(matches!(
            store.find_by_title("inception"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.find_by_title("Inception "),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_by_external_id() {
        let store = create_test_store();
        assert_eq!(store.find_by_external_id(155).unwrap().title, "The Dark Knight");
        assert!(matches!(
            store.find_by_external_id(1),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicates_resolve_to_first_row() {
        let store = CatalogStore::from_records(vec![
            record(1, "Out of the Blue"),
            record(2, "Heat"),
            record(3, "Out of the Blue"),
            record(2, "Heat (remaster)"),
        ]);
        assert_eq!(store.find_by_title("Out of the Blue").unwrap().row_index, 0);
        assert_eq!(store.find_by_external_id(2).unwrap().row_index, 1);
        assert_eq!(store.duplicate_titles(), 1);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_get_out_of_range() {
        let store = create_test_store();
        assert!(store.get(3).is_none());
        assert_eq!(store.get(2).unwrap().title, "The Dark Knight");
    }
}
