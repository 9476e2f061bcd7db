//! Shelfmate configuration system.
//!
//! Configuration can be loaded from:
//! - A TOML file (`--config` on the CLI, or the `SHELFMATE_CONFIG` variable)
//! - Environment variables (`SHELFMATE_*` prefixed)
//!
//! # Example
//!
//! ```toml
//! [artifacts]
//! data_dir = "/srv/shelfmate"
//! similarity = "${MODEL_DIR}/similarity_scores.json"
//!
//! [engine]
//! top_k = 5
//! self_exclusion = "by_index"
//! ```

use serde::{Deserialize, Serialize};
use shelfmate_core::{defaults, EngineConfig, SelfExclusion};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for shelfmate_core::Error {
    fn from(e: ConfigError) -> Self {
        shelfmate_core::Error::Config(e.to_string())
    }
}

/// Locations of the four input artifacts.
///
/// Relative file paths are resolved against `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub data_dir: PathBuf,
    pub books: PathBuf,
    pub popular: PathBuf,
    pub titles: PathBuf,
    pub similarity: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DATA_DIR),
            books: PathBuf::from(defaults::BOOKS_FILE),
            popular: PathBuf::from(defaults::POPULAR_FILE),
            titles: PathBuf::from(defaults::TITLES_FILE),
            similarity: PathBuf::from(defaults::SIMILARITY_FILE),
        }
    }
}

impl ArtifactPaths {
    /// Default file names under the given directory.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn books_path(&self) -> PathBuf {
        self.resolve(&self.books)
    }

    pub fn popular_path(&self) -> PathBuf {
        self.resolve(&self.popular)
    }

    pub fn titles_path(&self) -> PathBuf {
        self.resolve(&self.titles)
    }

    pub fn similarity_path(&self) -> PathBuf {
        self.resolve(&self.similarity)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub artifacts: ArtifactPaths,
    pub engine: EngineConfig,
}

impl ShelfConfig {
    /// Load configuration.
    ///
    /// Uses `path` when given, otherwise the file named by `SHELFMATE_CONFIG`,
    /// otherwise environment variables over defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let from_env_var = env::var(format!("{}CONFIG", defaults::ENV_PREFIX))
            .ok()
            .map(PathBuf::from);

        let config = match path.map(Path::to_path_buf).or(from_env_var) {
            Some(path) => {
                info!(
                    subsystem = "data",
                    component = "config",
                    path = %path.display(),
                    "Loading shelfmate config from file"
                );
                Self::from_file(&path)?
            }
            None => {
                debug!(
                    subsystem = "data",
                    component = "config",
                    "No config file given, using environment variables"
                );
                Self::from_env()?
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. `${VAR}` references are expanded.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment-shaped).
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", defaults::ENV_PREFIX, name));
        let mut config = Self::default();

        if let Some(dir) = var("DATA_DIR") {
            config.artifacts.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = var("BOOKS_PATH") {
            config.artifacts.books = PathBuf::from(path);
        }
        if let Some(path) = var("POPULAR_PATH") {
            config.artifacts.popular = PathBuf::from(path);
        }
        if let Some(path) = var("TITLES_PATH") {
            config.artifacts.titles = PathBuf::from(path);
        }
        if let Some(path) = var("SIMILARITY_PATH") {
            config.artifacts.similarity = PathBuf::from(path);
        }

        if let Some(value) = var("TOP_K") {
            config.engine.top_k = parse_value("SHELFMATE_TOP_K", &value)?;
        }
        if let Some(value) = var("POPULAR_LIMIT") {
            config.engine.popular_limit = parse_value("SHELFMATE_POPULAR_LIMIT", &value)?;
        }
        if let Some(value) = var("SELF_EXCLUSION") {
            config.engine.self_exclusion = match value.parse::<SelfExclusion>() {
                Ok(policy) => policy,
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "SHELFMATE_SELF_EXCLUSION".to_string(),
                        value,
                    })
                }
            };
        }
        if let Some(url) = var("PLACEHOLDER_URL") {
            config.engine.placeholder_base_url = url;
        }

        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.engine
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Replace `${VAR}` with the variable's value; unknown variables are kept.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

fn parse_value(key: &str, value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
