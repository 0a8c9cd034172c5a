//! Similarity Engine - Item-to-Item Cosine Similarity
//!
//! Scores how alike two items are from the ratings they share:
//! "Users who rated this item rated that one similarly"
//!
//! ## Algorithm
//! 1. Dot product over the co-raters (users who rated both items)
//! 2. Divide by the product of the two items' L2 norms
//! 3. Norms span every rater of each item by default ([`NormScope::AllRaters`]),
//!    or only the co-raters ([`NormScope::CoRaters`])
//! 4. Empty co-rater sets and zero norms score exactly 0
//!
//! `compute_all` scores every unordered pair of catalog items in parallel
//! and keeps the pairs scoring above the retention threshold.

use crate::matrix::ItemSimilarityMatrix;
use rating_store::{ItemId, RatingStore, UserRatings};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Which raters contribute to the norm terms of the cosine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormScope {
    /// Norms over each item's full rating vector.
    /// Values drop below the textbook cosine whenever an item has raters
    /// outside the co-rated set.
    #[default]
    AllRaters,
    /// Norms over the co-raters only (textbook cosine on the shared users)
    CoRaters,
}

/// Computes item similarities from a shared, read-only rating store
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    /// Shared reference to the rating store (read-only, so no Mutex needed)
    store: Arc<RatingStore>,

    /// Norm scope of the cosine
    norm_scope: NormScope,

    /// Pairs must score strictly above this to be retained by `compute_all`
    min_similarity: f64,
}

impl SimilarityEngine {
    /// Create a new engine over `store`
    pub fn new(store: Arc<RatingStore>) -> Self {
        Self {
            store,
            norm_scope: NormScope::AllRaters,
            min_similarity: 0.0,
        }
    }

    /// Configure the norm scope (default: all raters)
    pub fn with_norm_scope(mut self, norm_scope: NormScope) -> Self {
        self.norm_scope = norm_scope;
        self
    }

    /// Configure the retention threshold of `compute_all` (default: 0.0).
    ///
    /// Raising it prunes weak pairs; negative correlations are never kept
    /// unless this is lowered below zero.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn norm_scope(&self) -> NormScope {
        self.norm_scope
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Cosine similarity between two items.
    ///
    /// Returns 0 when no user rated both items or either norm is zero.
    /// Unknown items have no raters and therefore score 0.
    pub fn similarity(&self, item_a: ItemId, item_b: ItemId) -> f64 {
        let raters_a = self.store.raters_of(item_a);
        let raters_b = self.store.raters_of(item_b);
        self.score(raters_a, raters_b, l2_norm(raters_a), l2_norm(raters_b))
    }

    /// Score every unordered pair of distinct items.
    ///
    /// Item norms are computed once up front; the pairs are then scored in
    /// parallel. Output does not depend on the number of threads.
    #[instrument(skip(self), fields(norm_scope = ?self.norm_scope))]
    pub fn compute_all(&self) -> ItemSimilarityMatrix {
        let items = self.store.all_items();
        let raters: Vec<&UserRatings> = items.iter().map(|&i| self.store.raters_of(i)).collect();
        let norms: Vec<f64> = raters.iter().map(|r| l2_norm(r)).collect();
        debug!("Scoring {} items ({} pairs)", items.len(), pair_total(items.len()));

        let retained: Vec<(ItemId, ItemId, f64)> = (0..items.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let (items, raters, norms) = (&items, &raters, &norms);
                (i + 1..items.len()).filter_map(move |j| {
                    let score = self.score(raters[i], raters[j], norms[i], norms[j]);
                    (score > self.min_similarity).then_some((items[i], items[j], score))
                })
            })
            .collect();

        let mut matrix = ItemSimilarityMatrix::new();
        for (a, b, score) in retained {
            matrix.insert(a, b, score);
        }

        debug!("Retained {} similar pairs", matrix.pair_count());
        matrix
    }

    fn score(&self, a: &UserRatings, b: &UserRatings, norm_a: f64, norm_b: f64) -> f64 {
        // Walk the smaller vector; either way co-raters come in ascending
        // user order, so (a, b) and (b, a) sum identically.
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        let mut dot = 0.0;
        let mut co_norm_small = 0.0;
        let mut co_norm_large = 0.0;
        let mut co_raters = 0usize;
        for (user, &r_small) in small {
            if let Some(&r_large) = large.get(user) {
                dot += r_small * r_large;
                co_norm_small += r_small * r_small;
                co_norm_large += r_large * r_large;
                co_raters += 1;
            }
        }
        if co_raters == 0 {
            return 0.0;
        }

        let denominator = match self.norm_scope {
            NormScope::AllRaters => norm_a * norm_b,
            NormScope::CoRaters => co_norm_small.sqrt() * co_norm_large.sqrt(),
        };
        if denominator == 0.0 {
            return 0.0;
        }
        // Rounding can push identical vectors a hair past 1
        (dot / denominator).clamp(-1.0, 1.0)
    }
}

fn l2_norm(ratings: &UserRatings) -> f64 {
    ratings.values().map(|r| r * r).sum::<f64>().sqrt()
}

fn pair_total(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
