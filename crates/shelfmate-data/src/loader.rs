//! One-shot startup load of every input artifact.

use shelfmate_core::{BookRecord, PopularityEntry, Result};
use std::time::Instant;
use tracing::{error, info};

use crate::config::ArtifactPaths;
use crate::matrix::{load_similarity, load_titles};
use crate::tabular::{load_books, load_popular};

/// Raw contents of the four input artifacts, in source order.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub books: Vec<BookRecord>,
    pub popular: Vec<PopularityEntry>,
    pub titles: Vec<String>,
    pub similarity: Vec<Vec<f64>>,
}

/// Load metadata, then popularity, then the title ordering and matrix.
///
/// The first failure aborts the load; callers treat it as fatal.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Artifacts> {
    let start = Instant::now();

    let result = (|| -> Result<Artifacts> {
        let books = load_books(&paths.books_path())?;
        let popular = load_popular(&paths.popular_path())?;
        let titles = load_titles(&paths.titles_path())?;
        let similarity = load_similarity(&paths.similarity_path())?;
        Ok(Artifacts {
            books,
            popular,
            titles,
            similarity,
        })
    })();

    match &result {
        Ok(artifacts) => info!(
            subsystem = "data",
            component = "loader",
            op = "load",
            books = artifacts.books.len(),
            popular = artifacts.popular.len(),
            titles = artifacts.titles.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Artifacts loaded"
        ),
        Err(e) => error!(
            subsystem = "data",
            component = "loader",
            op = "load",
            error = %e,
            "Artifact load failed"
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmate_core::Error;
    use std::fs;

    fn write_all(dir: &std::path::Path) {
        fs::write(
            dir.join("Books.csv"),
            "Book-Title,Book-Author,Image-URL-M,Image-URL-L\nA,Ann,http://m/a,\n",
        )
        .unwrap();
        fs::write(
            dir.join("popular.csv"),
            "Book-Title,Book-Author,Image-URL-M,avg_rating\nA,Ann,,4.0\n",
        )
        .unwrap();
        fs::write(dir.join("titles.json"), r#"["A","B"]"#).unwrap();
        fs::write(dir.join("similarity_scores.json"), "[[1,0.5],[0.5,1]]").unwrap();
    }

    #[test]
    fn test_load_artifacts_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());

        let artifacts = load_artifacts(&ArtifactPaths::in_dir(dir.path())).unwrap();
        assert_eq!(artifacts.books.len(), 1);
        assert_eq!(artifacts.popular.len(), 1);
        assert_eq!(artifacts.titles, vec!["A", "B"]);
        assert_eq!(artifacts.similarity[0], vec![1.0, 0.5]);
    }

    #[test]
    fn test_load_artifacts_missing_matrix_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        fs::remove_file(dir.path().join("similarity_scores.json")).unwrap();

        let err = load_artifacts(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            Error::ArtifactLoad {
                artifact: "similarity",
                ..
            }
        ));
    }
}
