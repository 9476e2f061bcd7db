//! Hydration of the externally ranked popular-books list.

use shelfmate_core::defaults::{POPULAR_LIMIT, UNKNOWN_AUTHOR};
use shelfmate_core::{ImageResolver, PopularityCard, PopularityEntry};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::MetadataCatalog;

/// Enriches popularity rows with catalog cover images.
#[derive(Debug, Clone)]
pub struct PopularityHydrator {
    catalog: Arc<MetadataCatalog>,
    resolver: ImageResolver,
    limit: usize,
}

impl PopularityHydrator {
    pub fn new(catalog: Arc<MetadataCatalog>, resolver: ImageResolver) -> Self {
        Self {
            catalog,
            resolver,
            limit: POPULAR_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Cards for the first `limit` entries, in input order.
    ///
    /// Cover precedence: catalog large image, catalog medium image, then the
    /// entry's own image URL. The card's author is the entry's author, falling
    /// back to the catalog author and finally "Unknown author".
    pub fn hydrate(&self, entries: &[PopularityEntry]) -> Vec<PopularityCard> {
        let mut unmatched = 0usize;
        let mut placeholders = 0usize;

        let cards: Vec<PopularityCard> = entries
            .iter()
            .take(self.limit)
            .map(|entry| {
                let metadata = self.catalog.lookup(&entry.title);
                if metadata.is_none() {
                    unmatched += 1;
                }

                let author = entry
                    .author
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .or_else(|| metadata.and_then(|m| m.author()))
                    .unwrap_or(UNKNOWN_AUTHOR);

                let candidates = [
                    metadata.and_then(|m| m.image_url_large.as_deref()),
                    metadata.and_then(|m| m.image_url_medium.as_deref()),
                    entry.image_url.as_deref(),
                ];
                let raw = ImageResolver::select(&candidates);
                if ImageResolver::is_placeholder_input(raw) {
                    placeholders += 1;
                }

                PopularityCard {
                    title: entry.title.clone(),
                    author: author.to_string(),
                    image_url: self.resolver.resolve(raw, &entry.title, author),
                    avg_rating: entry.avg_rating.unwrap_or(0.0),
                }
            })
            .collect();

        if placeholders > 0 {
            warn!(
                subsystem = "search",
                component = "popular",
                placeholders,
                "Popular books without any cover URL, using placeholders"
            );
        }

        debug!(
            subsystem = "search",
            component = "popular",
            op = "hydrate",
            input = entries.len(),
            result_count = cards.len(),
            unmatched,
            "Popular list hydrated"
        );

        cards
    }
}
