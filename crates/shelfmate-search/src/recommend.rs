//! Title → ranked, metadata-enriched neighbors.

use shelfmate_core::defaults::{TOP_K, UNKNOWN_AUTHOR};
use shelfmate_core::{Error, ImageResolver, Recommendation, RecommendationOutcome, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::catalog::MetadataCatalog;
use crate::similarity::SimilarityStore;
use crate::title_index::TitleIndex;

/// Item-item recommender over shared, immutable lookup structures.
///
/// Cloning is cheap; clones share the same index, matrix, and catalog.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    index: Arc<TitleIndex>,
    store: Arc<SimilarityStore>,
    catalog: Arc<MetadataCatalog>,
    resolver: ImageResolver,
    top_k: usize,
}

impl RecommendationService {
    /// The index and matrix must describe the same title ordering.
    pub fn new(
        index: Arc<TitleIndex>,
        store: Arc<SimilarityStore>,
        catalog: Arc<MetadataCatalog>,
        resolver: ImageResolver,
    ) -> Result<Self> {
        if index.len() != store.len() {
            return Err(Error::InvalidArtifact(format!(
                "Title ordering has {} titles but similarity matrix has {} rows",
                index.len(),
                store.len()
            )));
        }

        Ok(Self {
            index,
            store,
            catalog,
            resolver,
            top_k: TOP_K,
        })
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn index(&self) -> &TitleIndex {
        &self.index
    }

    /// Neighbors of `query`; empty when the title is unknown.
    pub fn recommend(&self, query: &str) -> Vec<Recommendation> {
        self.recommend_detailed(query).into_items()
    }

    /// Like [`recommend`](Self::recommend) but keeps "unknown title" apart
    /// from "no neighbors".
    pub fn recommend_detailed(&self, query: &str) -> RecommendationOutcome {
        self.recommend_top(query, self.top_k)
    }

    #[instrument(skip(self), fields(subsystem = "search", component = "recommend", op = "recommend"))]
    pub fn recommend_top(&self, query: &str, k: usize) -> RecommendationOutcome {
        let start = Instant::now();

        let row = match self.index.position(query) {
            Ok(row) => row,
            Err(_) => {
                debug!(query, "Title not in recommender index");
                return RecommendationOutcome::NotFound {
                    query: query.to_string(),
                };
            }
        };
        // position() only returns rows that exist
        let title = self.index.title_at(row).unwrap_or(query).to_string();

        let neighbors = match self.store.top_similar(row, k) {
            Ok(neighbors) => neighbors,
            Err(e) => {
                warn!(title = %title, error = %e, "Similarity lookup failed");
                Vec::new()
            }
        };

        let items: Vec<Recommendation> = neighbors
            .into_iter()
            .filter_map(|(i, score)| self.enrich(i, score))
            .collect();

        debug!(
            title = %title,
            result_count = items.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Recommendations assembled"
        );

        if items.is_empty() {
            RecommendationOutcome::NoNeighbors { title }
        } else {
            RecommendationOutcome::Found { title, items }
        }
    }

    fn enrich(&self, index: usize, score: f64) -> Option<Recommendation> {
        let title = self.index.title_at(index)?;
        let metadata = self.catalog.lookup(title);

        let author = metadata
            .and_then(|m| m.author())
            .unwrap_or(UNKNOWN_AUTHOR);
        let image_url = self.resolver.resolve(
            metadata.and_then(|m| m.preferred_image()),
            title,
            author,
        );

        Some(Recommendation {
            title: title.to_string(),
            author: author.to_string(),
            image_url,
            score,
        })
    }
}
