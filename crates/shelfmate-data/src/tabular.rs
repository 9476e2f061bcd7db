//! CSV readers for the metadata and popularity artifacts.

use serde::de::DeserializeOwned;
use shelfmate_core::{BookRecord, Error, PopularityEntry, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Artifact label used in errors and logs.
pub const METADATA_ARTIFACT: &str = "metadata";
pub const POPULARITY_ARTIFACT: &str = "popularity";

const TITLE_COLUMN: &str = "Book-Title";

/// Read book metadata rows in source order. Duplicate titles are kept; the
/// catalog decides which one wins.
pub fn load_books(path: &Path) -> Result<Vec<BookRecord>> {
    let file = open(METADATA_ARTIFACT, path)?;
    read_books(file, path)
}

pub fn read_books<R: Read>(reader: R, source: &Path) -> Result<Vec<BookRecord>> {
    read_records(METADATA_ARTIFACT, reader, source)
}

/// Read the pre-ranked popularity list in source order.
pub fn load_popular(path: &Path) -> Result<Vec<PopularityEntry>> {
    let file = open(POPULARITY_ARTIFACT, path)?;
    read_popular(file, path)
}

pub fn read_popular<R: Read>(reader: R, source: &Path) -> Result<Vec<PopularityEntry>> {
    read_records(POPULARITY_ARTIFACT, reader, source)
}

fn open(artifact: &'static str, path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::artifact_load(artifact, path, e))
}

fn read_records<T, R>(artifact: &'static str, reader: R, source: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::artifact_load(artifact, source, format!("Failed to read headers: {e}")))?
        .clone();

    if !headers.iter().any(|h| h == TITLE_COLUMN) {
        return Err(Error::artifact_load(
            artifact,
            source,
            format!(
                "Missing {TITLE_COLUMN} column. Available columns: {:?}",
                headers.iter().collect::<Vec<_>>()
            ),
        ));
    }

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<T>() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            Error::artifact_load(artifact, source, format!("Bad row at line {line}: {e}"))
        })?;
        rows.push(row);
    }

    debug!(
        subsystem = "data",
        component = "tabular",
        artifact,
        row_count = rows.len(),
        "Read CSV artifact"
    );

    Ok(rows)
}
