//! Error types for shelfmate.

use thiserror::Error;

/// Result type alias using shelfmate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for shelfmate operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Title (or other lookup key) not present in the index
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required input artifact is missing or unreadable
    #[error("Failed to load {artifact} artifact from {path}: {message}")]
    ArtifactLoad {
        artifact: &'static str,
        path: String,
        message: String,
    },

    /// Artifact was read but its contents are inconsistent
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::ArtifactLoad`] for the named artifact.
    pub fn artifact_load(
        artifact: &'static str,
        path: impl AsRef<std::path::Path>,
        message: impl std::fmt::Display,
    ) -> Self {
        Error::ArtifactLoad {
            artifact,
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Whether this error should stop the process from serving.
    ///
    /// Only artifact problems are fatal; everything else degrades.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ArtifactLoad { .. } | Error::InvalidArtifact(_) | Error::Config(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
