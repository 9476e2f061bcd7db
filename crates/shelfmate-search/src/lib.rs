//! # shelfmate-search
//!
//! Item-item recommendation engine for shelfmate.
//!
//! This crate provides:
//! - Case-insensitive title resolution ([`TitleIndex`])
//! - Top-K retrieval over a precomputed similarity matrix ([`SimilarityStore`])
//! - First-wins metadata catalog ([`MetadataCatalog`])
//! - Enriched recommendations ([`RecommendationService`])
//! - Popular list hydration ([`PopularityHydrator`])
//! - A shared, immutable handle over all of the above ([`EngineContext`])
//!
//! ## Example
//!
//! ```
//! use shelfmate_search::{EngineConfig, EngineContext};
//!
//! let engine = EngineContext::build(
//!     Vec::new(),
//!     &[],
//!     vec!["A".into(), "B".into(), "C".into()],
//!     vec![
//!         vec![1.0, 0.9, 0.1],
//!         vec![0.9, 1.0, 0.3],
//!         vec![0.1, 0.3, 1.0],
//!     ],
//!     &EngineConfig::default(),
//! )?;
//!
//! let titles: Vec<String> = engine.recommend("a").into_iter().map(|r| r.title).collect();
//! assert_eq!(titles, vec!["B", "C"]);
//! # Ok::<(), shelfmate_search::Error>(())
//! ```

pub mod catalog;
pub mod context;
pub mod popular;
pub mod recommend;
pub mod similarity;
pub mod title_index;

// Re-export core types
pub use shelfmate_core::*;

pub use catalog::MetadataCatalog;
pub use context::EngineContext;
pub use popular::PopularityHydrator;
pub use recommend::RecommendationService;
pub use similarity::SimilarityStore;
pub use title_index::TitleIndex;
