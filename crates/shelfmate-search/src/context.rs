//! Immutable engine state built once at startup and shared by every query.

use shelfmate_core::{
    BookRecord, EngineConfig, EngineStats, ImageResolver, PopularityCard, PopularityEntry,
    Recommendation, RecommendationOutcome, Result,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::catalog::MetadataCatalog;
use crate::popular::PopularityHydrator;
use crate::recommend::RecommendationService;
use crate::similarity::SimilarityStore;
use crate::title_index::TitleIndex;

/// Handle to the built engine.
///
/// Cloning shares the underlying structures; nothing is mutated after
/// [`EngineContext::build`], so clones can be used from any thread.
#[derive(Debug, Clone)]
pub struct EngineContext {
    inner: Arc<EngineInner>,
}

#[derive(Debug)]
struct EngineInner {
    config: EngineConfig,
    catalog: Arc<MetadataCatalog>,
    recommender: RecommendationService,
    popular_cards: Vec<PopularityCard>,
}

impl EngineContext {
    /// Build every lookup structure from raw artifact contents.
    ///
    /// Order: metadata catalog, hydrated popular list, title index and matrix.
    pub fn build(
        books: Vec<BookRecord>,
        popular: &[PopularityEntry],
        titles: Vec<String>,
        similarity: Vec<Vec<f64>>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let start = Instant::now();
        config.validate()?;

        let resolver = ImageResolver::with_placeholder_base(config.placeholder_base_url.clone());

        let catalog = Arc::new(MetadataCatalog::from_records(books));

        let popular_cards = PopularityHydrator::new(Arc::clone(&catalog), resolver.clone())
            .with_limit(config.popular_limit)
            .hydrate(popular);

        let n = titles.len();
        let index = Arc::new(TitleIndex::new(titles)?);
        let store = Arc::new(
            SimilarityStore::from_rows(similarity, n)?.with_self_exclusion(config.self_exclusion),
        );

        let recommender =
            RecommendationService::new(index, store, Arc::clone(&catalog), resolver)?
                .with_top_k(config.top_k);

        info!(
            subsystem = "search",
            component = "context",
            op = "build",
            catalog_books = catalog.len(),
            recommender_titles = n,
            popular_cards = popular_cards.len(),
            top_k = config.top_k,
            self_exclusion = %config.self_exclusion,
            duration_ms = start.elapsed().as_millis() as u64,
            "Recommendation engine built"
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                config: config.clone(),
                catalog,
                recommender,
                popular_cards,
            }),
        })
    }

    /// Neighbors of `title` with the configured `top_k`; empty when unknown.
    pub fn recommend(&self, title: &str) -> Vec<Recommendation> {
        self.inner.recommender.recommend(title)
    }

    pub fn recommend_detailed(&self, title: &str) -> RecommendationOutcome {
        self.inner.recommender.recommend_detailed(title)
    }

    pub fn recommend_top(&self, title: &str, k: usize) -> RecommendationOutcome {
        self.inner.recommender.recommend_top(title, k)
    }

    /// The hydrated landing list.
    pub fn popular_cards(&self) -> &[PopularityCard] {
        &self.inner.popular_cards
    }

    /// Recommendable titles in lexicographic order.
    pub fn titles(&self) -> Vec<&str> {
        self.inner.recommender.index().sorted_titles()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            catalog_books: self.inner.catalog.len(),
            recommender_titles: self.inner.recommender.index().len(),
            popular_cards: self.inner.popular_cards.len(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.inner.catalog
    }

    pub fn recommender(&self) -> &RecommendationService {
        &self.inner.recommender
    }
}
