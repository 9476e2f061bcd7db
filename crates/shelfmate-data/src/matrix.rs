//! JSON readers for the title ordering and the similarity matrix.
//!
//! Both artifacts are exported from the same pivot table: the title array is
//! the pivot index and the matrix rows follow it exactly. Shape checks happen
//! when the similarity store is built.

use serde::de::DeserializeOwned;
use shelfmate_core::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

pub const TITLES_ARTIFACT: &str = "titles";
pub const SIMILARITY_ARTIFACT: &str = "similarity";

/// Read the ordered title list (JSON array of strings).
pub fn load_titles(path: &Path) -> Result<Vec<String>> {
    read_json(TITLES_ARTIFACT, open(TITLES_ARTIFACT, path)?, path)
}

pub fn read_titles<R: Read>(reader: R, source: &Path) -> Result<Vec<String>> {
    read_json(TITLES_ARTIFACT, reader, source)
}

/// Read the similarity matrix (JSON array of numeric rows).
pub fn load_similarity(path: &Path) -> Result<Vec<Vec<f64>>> {
    read_json(SIMILARITY_ARTIFACT, open(SIMILARITY_ARTIFACT, path)?, path)
}

pub fn read_similarity<R: Read>(reader: R, source: &Path) -> Result<Vec<Vec<f64>>> {
    read_json(SIMILARITY_ARTIFACT, reader, source)
}

fn open(artifact: &'static str, path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::artifact_load(artifact, path, e))
}

fn read_json<T, R>(artifact: &'static str, reader: R, source: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let rows: Vec<T> =
        serde_json::from_reader(reader).map_err(|e| Error::artifact_load(artifact, source, e))?;

    debug!(
        subsystem = "data",
        component = "matrix",
        artifact,
        row_count = rows.len(),
        "Read JSON artifact"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_titles() {
        let titles = read_titles(r#"["1984", "Animal Farm", "Dune"]"#.as_bytes(), Path::new("t"))
            .unwrap();
        assert_eq!(titles, vec!["1984", "Animal Farm", "Dune"]);
    }

    #[test]
    fn test_read_titles_rejects_non_strings() {
        let err = read_titles("[1, 2]".as_bytes(), Path::new("titles.json")).unwrap_err();
        assert!(matches!(
            err,
            Error::ArtifactLoad {
                artifact: TITLES_ARTIFACT,
                ..
            }
        ));
    }

    #[test]
    fn test_read_similarity() {
        let rows = read_similarity(
            "[[1.0, 0.9, 0.1], [0.9, 1.0, 0.3], [0.1, 0.3, 1.0]]".as_bytes(),
            Path::new("s"),
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![0.9, 1.0, 0.3]);
    }

    #[test]
    fn test_read_similarity_truncated_json() {
        let err = read_similarity("[[1.0, 0.9], [0.9".as_bytes(), Path::new("s.json"))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("similarity"));
    }

    #[test]
    fn test_load_titles_missing_file() {
        let err = load_titles(Path::new("/nonexistent/titles.json")).unwrap_err();
        assert!(matches!(err, Error::ArtifactLoad { .. }));
    }
}
