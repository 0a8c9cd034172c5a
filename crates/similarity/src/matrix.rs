//! Sparse symmetric item-to-item similarity matrix.

use rating_store::ItemId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Similarities of one item to its neighbors
pub type Neighbors = BTreeMap<ItemId, f64>;

static NO_NEIGHBORS: Neighbors = BTreeMap::new();

/// Symmetric sparse matrix of item similarities.
///
/// Every retained pair is stored in both directions with the same value.
/// Self-pairs are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemSimilarityMatrix {
    rows: BTreeMap<ItemId, Neighbors>,
    pair_count: usize,
}

impl ItemSimilarityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `score` for the unordered pair {a, b}. Self-pairs are ignored.
    pub(crate) fn insert(&mut self, a: ItemId, b: ItemId, score: f64) {
        if a == b {
            return;
        }
        let previous = self.rows.entry(a).or_default().insert(b, score);
        self.rows.entry(b).or_default().insert(a, score);
        if previous.is_none() {
            self.pair_count += 1;
        }
    }

    /// Similarity of the pair, `None` if it was not retained
    pub fn get(&self, a: ItemId, b: ItemId) -> Option<f64> {
        self.rows.get(&a)?.get(&b).copied()
    }

    /// All retained neighbors of an item; empty for unknown items
    pub fn neighbors(&self, item: ItemId) -> &Neighbors {
        self.rows.get(&item).unwrap_or(&NO_NEIGHBORS)
    }

    /// Up to `k` neighbors of `item`, most similar first, ties by ascending id
    pub fn most_similar(&self, item: ItemId, k: usize) -> Vec<(ItemId, f64)> {
        let mut neighbors: Vec<(ItemId, f64)> = self
            .neighbors(item)
            .iter()
            .map(|(&other, &score)| (other, score))
            .collect();
        neighbors.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            ord => ord,
        });
        neighbors.truncate(k);
        neighbors
    }

    /// Every retained pair once, as `(a, b, score)` with `a < b`
    pub fn pairs(&self) -> impl Iterator<Item = (ItemId, ItemId, f64)> + '_ {
        self.rows.iter().flat_map(|(&a, row)| {
            row.range((Bound::Excluded(a), Bound::Unbounded))
                .map(move |(&b, &score)| (a, b, score))
        })
    }

    /// Number of unordered pairs retained
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_symmetric() {
        let mut matrix = ItemSimilarityMatrix::new();
        matrix.insert(1, 2, 0.5);

        assert_eq!(matrix.get(1, 2), Some(0.5));
        assert_eq!(matrix.get(2, 1), Some(0.5));
        assert_eq!(matrix.pair_count(), 1);
    }

    #[test]
    fn test_self_pair_ignored() {
        let mut matrix = ItemSimilarityMatrix::new();
        matrix.insert(7, 7, 1.0);

        assert!(matrix.is_empty());
        assert_eq!(matrix.get(7, 7), None);
    }

    #[test]
    fn test_reinsert_does_not_double_count() {
        let mut matrix = ItemSimilarityMatrix::new();
        matrix.insert(1, 2, 0.5);
        matrix.insert(2, 1, 0.5);

        assert_eq!(matrix.pair_count(), 1);
        assert_eq!(matrix.pairs().count(), 1);
    }

    #[test]
    fn test_most_similar_tie_break() {
        let mut matrix = ItemSimilarityMatrix::new();
        matrix.insert(1, 4, 0.3);
        matrix.insert(1, 3, 0.9);
        matrix.insert(1, 2, 0.3);

        assert_eq!(matrix.most_similar(1, 10), vec![(3, 0.9), (2, 0.3), (4, 0.3)]);
        assert_eq!(matrix.most_similar(1, 1), vec![(3, 0.9)]);
        assert!(matrix.most_similar(99, 5).is_empty());
    }

    #[test]
    fn test_pairs_ordered() {
        let mut matrix = ItemSimilarityMatrix::new();
        matrix.insert(3, 1, 0.2);
        matrix.insert(2, 1, 0.4);

        let pairs: Vec<_> = matrix.pairs().collect();
        assert_eq!(pairs, vec![(1, 2, 0.4), (1, 3, 0.2)]);
    }
}
