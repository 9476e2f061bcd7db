//! Case-insensitive resolution of user-typed titles to canonical titles.

use shelfmate_core::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Canonical title ordering plus a folded-title lookup table.
///
/// The position of a title in the ordering is its row (and column) in the
/// similarity matrix.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    titles: Vec<String>,
    by_folded: HashMap<String, usize>,
}

/// Case folding applied to both stored titles and queries.
pub fn fold(title: &str) -> String {
    title.to_lowercase()
}

impl TitleIndex {
    /// Build the index from the matrix's title ordering.
    ///
    /// Exact duplicate titles are rejected since they would make matrix rows
    /// ambiguous. Titles differing only by case are accepted; the later one in
    /// the ordering owns the folded key.
    pub fn new(titles: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(titles.len());
        for title in &titles {
            if !seen.insert(title.as_str()) {
                return Err(Error::InvalidArtifact(format!(
                    "Duplicate title in ordering: {}",
                    title
                )));
            }
        }

        let mut by_folded = HashMap::with_capacity(titles.len());
        let mut collisions = 0usize;
        for (position, title) in titles.iter().enumerate() {
            if by_folded.insert(fold(title), position).is_some() {
                collisions += 1;
            }
        }

        debug!(
            subsystem = "search",
            component = "title_index",
            op = "build",
            titles = titles.len(),
            case_collisions = collisions,
            "Title index built"
        );

        Ok(Self { titles, by_folded })
    }

    /// Canonical title for `query`, matched exactly after case folding.
    pub fn resolve(&self, query: &str) -> Result<&str> {
        self.position(query).map(|i| self.titles[i].as_str())
    }

    /// Matrix row of the title `query` resolves to.
    pub fn position(&self, query: &str) -> Result<usize> {
        if query.is_empty() {
            return Err(Error::NotFound("empty title".to_string()));
        }
        self.by_folded
            .get(&fold(query))
            .copied()
            .ok_or_else(|| Error::NotFound(query.to_string()))
    }

    pub fn title_at(&self, position: usize) -> Option<&str> {
        self.titles.get(position).map(String::as_str)
    }

    /// Titles in matrix order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Titles in lexicographic order, for pickers.
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.titles.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(titles: &[&str]) -> TitleIndex {
        TitleIndex::new(titles.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let idx = index(&["The Hobbit", "Dune"]);
        assert_eq!(idx.resolve("the hobbit").unwrap(), "The Hobbit");
        assert_eq!(idx.resolve("THE HOBBIT").unwrap(), "The Hobbit");
        assert_eq!(idx.resolve("dUNE").unwrap(), "Dune");
    }

    #[test]
    fn test_position_matches_ordering() {
        let idx = index(&["A", "B", "C"]);
        assert_eq!(idx.position("a").unwrap(), 0);
        assert_eq!(idx.position("C").unwrap(), 2);
        assert_eq!(idx.title_at(1), Some("B"));
        assert_eq!(idx.title_at(3), None);
    }

    #[test]
    fn test_no_trimming_or_fuzzy_matching() {
        let idx = index(&["Dune"]);
        assert!(matches!(idx.resolve(" Dune"), Err(Error::NotFound(_))));
        assert!(matches!(idx.resolve("Dune "), Err(Error::NotFound(_))));
        assert!(matches!(idx.resolve("Dun"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_empty_query_not_found() {
        let idx = index(&["Dune"]);
        assert!(matches!(idx.resolve(""), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_unicode_folding() {
        let idx = index(&["Éloge de l'ombre"]);
        assert_eq!(idx.resolve("éloge de l'OMBRE").unwrap(), "Éloge de l'ombre");
    }

    #[test]
    fn test_case_collision_later_title_wins() {
        let idx = index(&["It", "IT"]);
        assert_eq!(idx.resolve("it").unwrap(), "IT");
        assert_eq!(idx.position("It").unwrap(), 1);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn test_duplicate_titles_rejected() {
        let err = TitleIndex::new(vec!["Dune".to_string(), "Dune".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact(_)));
    }

    #[test]
    fn test_sorted_titles() {
        let idx = index(&["Dune", "1984", "Animal Farm"]);
        assert_eq!(idx.sorted_titles(), vec!["1984", "Animal Farm", "Dune"]);
        assert_eq!(idx.titles()[0], "Dune");
    }

    #[test]
    fn test_empty_index() {
        let idx = index(&[]);
        assert!(idx.is_empty());
        assert!(idx.resolve("anything").is_err());
    }
}
