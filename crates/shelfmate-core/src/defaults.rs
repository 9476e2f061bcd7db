//! Centralized default constants for shelfmate.
//!
//! All crates and the CLI reference these constants instead of defining their
//! own magic numbers. When adding new constants, place them in the appropriate
//! section.

// =============================================================================
// RETRIEVAL
// =============================================================================

/// Number of neighbors returned per recommendation query.
pub const TOP_K: usize = 5;

/// Author shown on a recommendation whose title has no metadata row.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

// =============================================================================
// POPULARITY
// =============================================================================

/// Maximum number of popular books hydrated for the landing list.
pub const POPULAR_LIMIT: usize = 50;

// =============================================================================
// IMAGES
// =============================================================================

/// Placeholder image endpoint, sized for a book cover thumbnail.
pub const PLACEHOLDER_BASE_URL: &str = "https://via.placeholder.com/200x300";

/// Maximum characters of the title embedded in a placeholder URL.
pub const PLACEHOLDER_TITLE_CHARS: usize = 30;

/// Maximum characters of the author embedded in a placeholder URL.
pub const PLACEHOLDER_AUTHOR_CHARS: usize = 20;

/// Encoded line break between title and author in placeholder text.
pub const PLACEHOLDER_SEPARATOR: &str = "%0A";

pub const SECURE_SCHEME: &str = "https://";
pub const INSECURE_SCHEME: &str = "http://";

// =============================================================================
// ARTIFACTS
// =============================================================================

/// Default directory holding the input artifacts.
pub const DATA_DIR: &str = ".";

/// Book metadata CSV (one row per edition, duplicate titles allowed).
pub const BOOKS_FILE: &str = "Books.csv";

/// Pre-ranked popularity CSV.
pub const POPULAR_FILE: &str = "popular.csv";

/// JSON array of canonical titles in matrix order.
pub const TITLES_FILE: &str = "titles.json";

/// JSON N×N similarity matrix.
pub const SIMILARITY_FILE: &str = "similarity_scores.json";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SHELFMATE_";
