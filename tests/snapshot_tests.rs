use std::path::PathBuf;
use std::sync::Arc;

use movie_recs::{db::Snapshot, services::Recommender};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn load_bundled() -> Snapshot {
    let dir = data_dir();
    Snapshot::load(&dir.join("movies.json"), &dir.join("similarity")).unwrap()
}

#[test]
fn test_bundled_snapshot_loads_across_chunks() {
    let snapshot = load_bundled();
    assert_eq!(snapshot.catalog.len(), 5);
    assert_eq!(snapshot.similarity.dimension(), 5);
    // Row 3 is the first row of the second chunk
    assert_eq!(
        snapshot.similarity.row_for(3).unwrap(),
        &[0.08, 0.29, 0.12, 1.0, 0.19]
    );
    assert!(snapshot.similarity.rows_without_maximal_self().is_empty());
}

#[test]
fn test_bundled_snapshot_recommendations() {
    let recommender = Recommender::new(Arc::new(load_bundled()));
    let titles: Vec<&str> = recommender
        .recommend("Inception", 2)
        .unwrap()
        .into_iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Interstellar", "The Matrix"]);
}

#[test]
fn test_every_title_gets_all_neighbors() {
    let recommender = Recommender::new(Arc::new(load_bundled()));
    let titles: Vec<String> = recommender
        .snapshot()
        .catalog
        .list_titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    for title in &titles {
        let result = recommender.recommend(title, 10).unwrap();
        assert_eq!(result.len(), titles.len() - 1);
        assert!(result.iter().all(|e| &e.title != title));
    }
}
