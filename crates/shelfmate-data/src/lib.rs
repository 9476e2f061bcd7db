//! # shelfmate-data
//!
//! Configuration and artifact loading for shelfmate.
//!
//! This crate provides:
//! - [`ShelfConfig`]: TOML / environment configuration
//! - CSV readers for the book metadata and popularity artifacts
//! - JSON readers for the title ordering and similarity matrix
//! - [`load_artifacts`]: the ordered, all-or-nothing startup load

pub mod config;
pub mod loader;
pub mod matrix;
pub mod tabular;

pub use config::{ArtifactPaths, ConfigError, ConfigResult, ShelfConfig};
pub use loader::{load_artifacts, Artifacts};
pub use matrix::{load_similarity, load_titles, read_similarity, read_titles};
pub use tabular::{load_books, load_popular, read_books, read_popular};
