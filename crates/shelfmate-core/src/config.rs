//! Engine tuning knobs shared by the loader configuration and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::{Error, Result};

/// How the queried title is kept out of its own neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfExclusion {
    /// Drop the entry whose index equals the queried row.
    #[default]
    ByIndex,
    /// Drop whichever entry ranks first after sorting. Only correct when the
    /// diagonal is the row maximum; kept to reproduce legacy outputs.
    SkipTop,
}

impl FromStr for SelfExclusion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "by_index" => Ok(Self::ByIndex),
            "skip_top" => Ok(Self::SkipTop),
            _ => Err(Error::Config(format!(
                "Invalid self exclusion policy: {} (expected by_index or skip_top)",
                s
            ))),
        }
    }
}

impl fmt::Display for SelfExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIndex => write!(f, "by_index"),
            Self::SkipTop => write!(f, "skip_top"),
        }
    }
}

/// Engine behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Neighbors returned per recommendation query.
    pub top_k: usize,
    /// Popular entries kept for the landing list.
    pub popular_limit: usize,
    pub self_exclusion: SelfExclusion,
    /// Placeholder image endpoint used when a book has no cover URL.
    pub placeholder_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            popular_limit: defaults::POPULAR_LIMIT,
            self_exclusion: SelfExclusion::default(),
            placeholder_base_url: defaults::PLACEHOLDER_BASE_URL.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be at least 1".to_string()));
        }
        if self.popular_limit == 0 {
            return Err(Error::Config(
                "popular_limit must be at least 1".to_string(),
            ));
        }
        if self.placeholder_base_url.trim().is_empty() {
            return Err(Error::Config(
                "placeholder_base_url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
