//! Structured logging schema and field name constants for shelfmate.
//!
//! All crates log with these field names so the JSON log output can be
//! queried by the same keys regardless of which subsystem emitted it.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Startup cannot continue (artifact load failure) |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (artifact loaded, engine built) |
//! | DEBUG | Decision points (title not found, dedup counts) |
//! | TRACE | Per-item iteration (neighbors, hydrated cards) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "data", "search", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "title_index", "similarity_store", "catalog", "recommend", "popular"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "load", "build", "recommend", "hydrate"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Free-text title as typed by the caller.
pub const QUERY: &str = "query";

/// Canonical title after resolution.
pub const TITLE: &str = "title";

/// Artifact kind ("metadata", "popularity", "titles", "similarity").
pub const ARTIFACT: &str = "artifact";

/// Filesystem path of an artifact.
pub const PATH: &str = "path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of rows read from an artifact.
pub const ROW_COUNT: &str = "row_count";

/// Number of duplicate rows dropped during catalog construction.
pub const DUPLICATES_DROPPED: &str = "duplicates_dropped";

/// Requested neighbor count.
pub const TOP_K: &str = "top_k";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
