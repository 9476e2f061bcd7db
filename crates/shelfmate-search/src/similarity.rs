//! Precomputed item-item similarity matrix and top-K neighbor retrieval.

use shelfmate_core::{Error, Result, SelfExclusion};
use std::cmp::Ordering;
use tracing::trace;

/// Square similarity matrix stored row-major, aligned with a [`TitleIndex`].
///
/// [`TitleIndex`]: crate::TitleIndex
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    n: usize,
    scores: Vec<f64>,
    self_exclusion: SelfExclusion,
}

impl SimilarityStore {
    /// Build from matrix rows, checking the matrix is `n`×`n`.
    pub fn from_rows(rows: Vec<Vec<f64>>, n: usize) -> Result<Self> {
        if rows.len() != n {
            return Err(Error::InvalidArtifact(format!(
                "Similarity matrix has {} rows, expected {}",
                rows.len(),
                n
            )));
        }

        let mut scores = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidArtifact(format!(
                    "Similarity matrix row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            scores.extend(row);
        }

        Ok(Self {
            n,
            scores,
            self_exclusion: SelfExclusion::default(),
        })
    }

    pub fn with_self_exclusion(mut self, policy: SelfExclusion) -> Self {
        self.self_exclusion = policy;
        self
    }

    pub fn self_exclusion(&self) -> SelfExclusion {
        self.self_exclusion
    }

    /// Number of titles (rows).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index < self.n {
            Some(&self.scores[index * self.n..(index + 1) * self.n])
        } else {
            None
        }
    }

    pub fn score(&self, row: usize, column: usize) -> Option<f64> {
        self.row(row).and_then(|r| r.get(column).copied())
    }

    /// Up to `k` most similar entries to `row`, best first, never including
    /// `row` itself under [`SelfExclusion::ByIndex`].
    ///
    /// Equal scores keep ascending index order.
    pub fn top_similar(&self, row: usize, k: usize) -> Result<Vec<(usize, f64)>> {
        let scores = self.row(row).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Row {} out of range for {} titles",
                row, self.n
            ))
        })?;

        let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
        if self.self_exclusion == SelfExclusion::ByIndex {
            ranked.retain(|&(i, _)| i != row);
        }

        // stable: ties stay in index order
        ranked.sort_by(by_score_desc);

        let skip = match self.self_exclusion {
            SelfExclusion::ByIndex => 0,
            SelfExclusion::SkipTop => 1,
        };
        let top: Vec<(usize, f64)> = ranked.into_iter().skip(skip).take(k).collect();

        trace!(
            subsystem = "search",
            component = "similarity_store",
            op = "top_similar",
            row,
            top_k = k,
            result_count = top.len(),
            "Neighbors ranked"
        );

        Ok(top)
    }
}

/// Descending score order; NaN ranks below every number.
fn by_score_desc(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    match (a.1.is_nan(), b.1.is_nan()) {
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> SimilarityStore {
        SimilarityStore::from_rows(
            vec![
                vec![1.0, 0.9, 0.1],
                vec![0.9, 1.0, 0.3],
                vec![0.1, 0.3, 1.0],
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_top_similar_example() {
        let store = abc();
        assert_eq!(store.top_similar(0, 2).unwrap(), vec![(1, 0.9), (2, 0.1)]);
        assert_eq!(store.top_similar(2, 2).unwrap(), vec![(1, 0.3), (0, 0.1)]);
    }

    #[test]
    fn test_top_similar_caps_at_available() {
        let store = abc();
        assert_eq!(store.top_similar(1, 5).unwrap().len(), 2);
        assert!(store.top_similar(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let store = SimilarityStore::from_rows(
            vec![
                vec![1.0, 0.5, 0.7, 0.5, 0.7],
                vec![0.5, 1.0, 0.0, 0.0, 0.0],
                vec![0.7, 0.0, 1.0, 0.0, 0.0],
                vec![0.5, 0.0, 0.0, 1.0, 0.0],
                vec![0.7, 0.0, 0.0, 0.0, 1.0],
            ],
            5,
        )
        .unwrap();

        let top = store.top_similar(0, 4).unwrap();
        let indices: Vec<usize> = top.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_near_equal_scores_keep_full_precision() {
        let store = SimilarityStore::from_rows(
            vec![
                vec![1.0, 0.30000001, 0.30000002],
                vec![0.30000001, 1.0, 0.0],
                vec![0.30000002, 0.0, 1.0],
            ],
            3,
        )
        .unwrap();

        assert_eq!(
            store.top_similar(0, 2).unwrap(),
            vec![(2, 0.30000002), (1, 0.30000001)]
        );
    }

    #[test]
    fn test_row_of_all_ties_is_index_order() {
        let store = SimilarityStore::from_rows(vec![vec![0.0; 4]; 4], 4).unwrap();
        let top = store.top_similar(2, 3).unwrap();
        assert_eq!(top, vec![(0, 0.0), (1, 0.0), (3, 0.0)]);
    }

    #[test]
    fn test_by_index_excludes_self_even_when_not_max() {
        // row 0's self-similarity is lower than its score against 1
        let rows = vec![
            vec![0.8, 0.95, 0.2],
            vec![0.95, 1.0, 0.4],
            vec![0.2, 0.4, 1.0],
        ];
        let store = SimilarityStore::from_rows(rows, 3).unwrap();
        assert_eq!(store.top_similar(0, 2).unwrap(), vec![(1, 0.95), (2, 0.2)]);
    }

    #[test]
    fn test_skip_top_drops_first_ranked_entry() {
        let rows = vec![
            vec![0.8, 0.95, 0.2],
            vec![0.95, 1.0, 0.4],
            vec![0.2, 0.4, 1.0],
        ];
        let store = SimilarityStore::from_rows(rows, 3)
            .unwrap()
            .with_self_exclusion(SelfExclusion::SkipTop);

        // legacy behavior: the real top neighbor is lost and self leaks in
        assert_eq!(store.top_similar(0, 2).unwrap(), vec![(0, 0.8), (2, 0.2)]);
    }

    #[test]
    fn test_skip_top_returns_self_when_diagonal_tied() {
        let rows = vec![
            vec![1.0, 1.0, 0.5],
            vec![1.0, 1.0, 0.5],
            vec![0.5, 0.5, 1.0],
        ];
        let skip_top = SimilarityStore::from_rows(rows.clone(), 3)
            .unwrap()
            .with_self_exclusion(SelfExclusion::SkipTop);
        let by_index = SimilarityStore::from_rows(rows, 3).unwrap();

        // row 0 ties the diagonal and sorts first, so the skip removes it
        assert_eq!(skip_top.top_similar(1, 2).unwrap(), vec![(1, 1.0), (2, 0.5)]);
        assert_eq!(by_index.top_similar(1, 2).unwrap(), vec![(0, 1.0), (2, 0.5)]);
    }

    #[test]
    fn test_policies_agree_on_well_formed_matrix() {
        let by_index = abc();
        let skip_top = abc().with_self_exclusion(SelfExclusion::SkipTop);
        for row in 0..3 {
            assert_eq!(
                by_index.top_similar(row, 5).unwrap(),
                skip_top.top_similar(row, 5).unwrap()
            );
        }
    }

    #[test]
    fn test_nan_ranks_last() {
        let store = SimilarityStore::from_rows(
            vec![
                vec![1.0, f64::NAN, 0.2, 0.6],
                vec![f64::NAN, 1.0, 0.0, 0.0],
                vec![0.2, 0.0, 1.0, 0.0],
                vec![0.6, 0.0, 0.0, 1.0],
            ],
            4,
        )
        .unwrap();
        let indices: Vec<usize> = store
            .top_similar(0, 3)
            .unwrap()
            .iter()
            .map(|(i, _)| *i)
            .collect();
        assert_eq!(indices, vec![3, 2, 1]);
    }

    #[test]
    fn test_out_of_range_row() {
        let err = abc().top_similar(3, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_shape_validation() {
        let err = SimilarityStore::from_rows(vec![vec![1.0, 0.0]], 2).unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact(_)));

        let err =
            SimilarityStore::from_rows(vec![vec![1.0, 0.0], vec![0.0]], 2).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 columns"));
    }

    #[test]
    fn test_row_and_score_accessors() {
        let store = abc();
        assert_eq!(store.row(1), Some(&[0.9, 1.0, 0.3][..]));
        assert_eq!(store.score(2, 1), Some(0.3));
        assert_eq!(store.score(3, 0), None);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_repeated_queries_identical() {
        let store = abc();
        let first = store.top_similar(1, 2).unwrap();
        for _ in 0..10 {
            assert_eq!(store.top_similar(1, 2).unwrap(), first);
        }
    }
}
