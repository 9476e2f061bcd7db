//! Deduplicated title → metadata lookup.

use shelfmate_core::{BookMetadata, BookRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Book metadata keyed by exact title.
///
/// The metadata artifact lists one row per edition, so a title can appear many
/// times. The first row seen for a title wins and later ones are dropped, which
/// keeps lookups deterministic for a fixed input order.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    books: HashMap<String, BookMetadata>,
}

impl MetadataCatalog {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BookRecord>,
    {
        let mut books = HashMap::new();
        let mut rows = 0usize;
        let mut duplicates = 0usize;

        for record in records {
            rows += 1;
            let (title, metadata) = record.into_parts();
            match books.entry(title) {
                Entry::Vacant(slot) => {
                    slot.insert(metadata);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        debug!(
            subsystem = "search",
            component = "catalog",
            op = "build",
            row_count = rows,
            books = books.len(),
            duplicates_dropped = duplicates,
            "Metadata catalog built"
        );

        Self { books }
    }

    pub fn lookup(&self, title: &str) -> Option<&BookMetadata> {
        self.books.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.books.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
