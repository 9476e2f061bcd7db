//! # shelfmate-core
//!
//! Core types, errors, and shared building blocks for shelfmate.
//!
//! This crate provides the data model that the loaders produce and the engine
//! returns, the crate-wide error type, default constants, and the cover image
//! URL resolver that every hydrated result passes through.

pub mod config;
pub mod defaults;
pub mod error;
pub mod image;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use config::{EngineConfig, SelfExclusion};
pub use error::{Error, Result};
pub use image::ImageResolver;
pub use models::*;
