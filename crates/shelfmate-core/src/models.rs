//! Data model shared by the loaders, the engine, and its callers.

use serde::{Deserialize, Serialize};

// =============================================================================
// METADATA
// =============================================================================

/// One row of the book metadata artifact.
///
/// Column names follow the Book-Crossing export. Empty cells deserialize to
/// `None`; unknown columns (ISBN, year, publisher) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "Book-Title")]
    pub title: String,

    #[serde(rename = "Book-Author", default)]
    pub author: Option<String>,

    #[serde(rename = "Image-URL-M", default)]
    pub image_url_medium: Option<String>,

    #[serde(rename = "Image-URL-L", default)]
    pub image_url_large: Option<String>,
}

impl BookRecord {
    /// Split the record into its title key and catalog value.
    pub fn into_parts(self) -> (String, BookMetadata) {
        (
            self.title,
            BookMetadata {
                author: self.author,
                image_url_medium: self.image_url_medium,
                image_url_large: self.image_url_large,
            },
        )
    }
}

/// Fixed-shape metadata kept per title in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub author: Option<String>,
    pub image_url_medium: Option<String>,
    pub image_url_large: Option<String>,
}

impl BookMetadata {
    /// Best available cover URL: large, then medium. Empty strings are skipped.
    pub fn preferred_image(&self) -> Option<&str> {
        non_empty(self.image_url_large.as_deref())
            .or_else(|| non_empty(self.image_url_medium.as_deref()))
    }

    /// Author, if the row carried a non-empty one.
    pub fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// POPULARITY
// =============================================================================

/// One row of the pre-ranked popularity artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityEntry {
    #[serde(rename = "Book-Title")]
    pub title: String,

    #[serde(rename = "Book-Author", default)]
    pub author: Option<String>,

    #[serde(rename = "Image-URL-M", default)]
    pub image_url: Option<String>,

    #[serde(alias = "Avg-Rating", default)]
    pub avg_rating: Option<f64>,

    #[serde(alias = "Num-Ratings", default)]
    pub num_ratings: Option<u64>,
}

impl PopularityEntry {
    /// Convenience constructor used by tests and callers assembling lists in code.
    pub fn new(title: impl Into<String>, author: impl Into<String>, avg_rating: f64) -> Self {
        Self {
            title: title.into(),
            author: Some(author.into()),
            image_url: None,
            avg_rating: Some(avg_rating),
            num_ratings: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Hydrated landing-page card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityCard {
    pub title: String,
    pub author: String,
    /// Always non-empty.
    pub image_url: String,
    pub avg_rating: f64,
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

/// One enriched neighbor of the queried title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical title from the title ordering.
    pub title: String,
    /// Catalog author, or [`crate::defaults::UNKNOWN_AUTHOR`].
    pub author: String,
    /// Always non-empty.
    pub image_url: String,
    /// Raw similarity value, not renormalized.
    pub score: f64,
}

/// Result of a recommendation query that keeps "unknown title" distinct from
/// "known title without neighbors".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// The query did not resolve to any canonical title.
    NotFound { query: String },
    /// The title exists but the matrix offers no other titles.
    NoNeighbors { title: String },
    /// Ranked neighbors of `title`.
    Found {
        title: String,
        items: Vec<Recommendation>,
    },
}

impl RecommendationOutcome {
    /// Canonical title the query resolved to, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => None,
            Self::NoNeighbors { title } | Self::Found { title, .. } => Some(title.as_str()),
        }
    }

    pub fn items(&self) -> &[Recommendation] {
        match self {
            Self::Found { items, .. } => items,
            _ => &[],
        }
    }

    /// Default rendering: the list of recommendations, empty for both
    /// `NotFound` and `NoNeighbors`.
    pub fn into_items(self) -> Vec<Recommendation> {
        match self {
            Self::Found { items, .. } => items,
            _ => Vec::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Size counters for a built engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Distinct titles in the metadata catalog.
    pub catalog_books: usize,
    /// Titles in the similarity matrix.
    pub recommender_titles: usize,
    /// Hydrated popular cards.
    pub popular_cards: usize,
}
