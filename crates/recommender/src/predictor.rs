//! Item-neighborhood rating prediction.
//!
//! The prediction for (user, item) is the similarity-weighted average of the
//! user's other ratings:
//!
//! ```text
//! Σ sim(item, j) * r_j / Σ |sim(item, j)|
//! ```
//!
//! over every item `j` the user rated (other than `item`) that has a nonzero
//! entry for `item` in the similarity matrix.
//!
//! When no such `j` exists the prediction falls back to the user's own mean
//! rating, or to the mean of the whole store for users with no ratings.

use crate::traits::RatingPredictor;
use crate::types::{Prediction, PredictionBasis};
use rating_store::{ItemId, RatingStore, UserId};
use similarity::ItemSimilarityMatrix;
use std::sync::Arc;

/// Weighted-average predictor over a shared rating store
#[derive(Debug, Clone)]
pub struct Predictor {
    store: Arc<RatingStore>,
}

impl Predictor {
    pub fn new(store: Arc<RatingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RatingStore> {
        &self.store
    }

    fn fallback(&self, user: UserId) -> Prediction {
        match self.store.user_average(user) {
            Some(value) => Prediction {
                value,
                basis: PredictionBasis::UserAverage,
            },
            None => Prediction {
                value: self.store.global_average(),
                basis: PredictionBasis::GlobalAverage,
            },
        }
    }
}

impl RatingPredictor for Predictor {
    fn name(&self) -> &str {
        "ItemNeighborhoodPredictor"
    }

    fn predict(&self, user: UserId, item: ItemId, matrix: &ItemSimilarityMatrix) -> Prediction {
        let neighbors = matrix.neighbors(item);

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut used = 0;
        for (&rated_item, &rating) in self.store.ratings_by_user(user) {
            if rated_item == item {
                continue;
            }
            match neighbors.get(&rated_item) {
                Some(&sim) if sim != 0.0 => {
                    numerator += sim * rating;
                    denominator += sim.abs();
                    used += 1;
                }
                _ => {}
            }
        }

        if denominator == 0.0 {
            return self.fallback(user);
        }
        Prediction {
            value: numerator / denominator,
            basis: PredictionBasis::Neighborhood { neighbors: used },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rating_store::sample_store;
    use similarity::SimilarityEngine;

    fn sample_setup() -> (Predictor, ItemSimilarityMatrix) {
        let store = Arc::new(sample_store());
        let matrix = SimilarityEngine::new(store.clone()).compute_all();
        (Predictor::new(store), matrix)
    }

    #[test]
    fn test_weighted_average_by_hand() {
        let (predictor, matrix) = sample_setup();

        // User 5 rated only 103 among the neighbors of 106
        let prediction = predictor.predict(5, 106, &matrix);
        assert_eq!(prediction.value, 4.0);
        assert_eq!(prediction.basis, PredictionBasis::Neighborhood { neighbors: 1 });

        // User 3 on 102: neighbors 101, 104, 105, 107
        let expected = [(101, 2.5), (104, 4.0), (105, 4.5), (107, 5.0)]
            .iter()
            .map(|&(j, r)| (matrix.get(102, j).unwrap() * r, matrix.get(102, j).unwrap()))
            .fold((0.0, 0.0), |(n, d), (wn, wd)| (n + wn, d + wd));
        let value = predictor.predict_rating(3, 102, &matrix);
        assert!((value - expected.0 / expected.1).abs() < 1e-12);
        assert!((value - 3.8173320766739587).abs() < 1e-9);
    }

    #[test]
    fn test_cold_start_uses_global_average() {
        let (predictor, matrix) = sample_setup();

        for item in [101, 104, 106, 999] {
            let prediction = predictor.predict(42, item, &matrix);
            assert_eq!(prediction.basis, PredictionBasis::GlobalAverage);
            assert_eq!(prediction.value, predictor.store().global_average());
        }
        assert!((predictor.predict_rating(42, 101, &matrix) - 3.4375).abs() < 1e-12);
    }

    #[test]
    fn test_no_similar_items_uses_user_average() {
        let mut store = RatingStore::new();
        store.add_rating(1, 10, 2.0).unwrap();
        store.add_rating(1, 11, 4.0).unwrap();
        store.add_rating(2, 12, 5.0).unwrap();
        let store = Arc::new(store);
        let matrix = SimilarityEngine::new(store.clone()).compute_all();
        let predictor = Predictor::new(store);

        // Item 12 shares no raters with 10 or 11
        let prediction = predictor.predict(1, 12, &matrix);
        assert_eq!(prediction.basis, PredictionBasis::UserAverage);
        assert_eq!(prediction.value, 3.0);
    }

    #[test]
    fn test_target_item_excluded() {
        let mut store = RatingStore::new();
        store.add_rating(1, 10, 1.0).unwrap();
        store.add_rating(1, 11, 5.0).unwrap();
        store.add_rating(2, 10, 2.0).unwrap();
        store.add_rating(2, 11, 4.0).unwrap();
        let store = Arc::new(store);
        let matrix = SimilarityEngine::new(store.clone()).compute_all();
        let predictor = Predictor::new(store);

        // Predicting an already rated item only uses the other item
        let prediction = predictor.predict(1, 10, &matrix);
        assert!((prediction.value - 5.0).abs() < 1e-12);
        assert_eq!(prediction.basis, PredictionBasis::Neighborhood { neighbors: 1 });
    }

    #[test]
    fn test_empty_store_neutral() {
        let store = Arc::new(RatingStore::new());
        let predictor = Predictor::new(store);

        let prediction = predictor.predict(1, 1, &ItemSimilarityMatrix::new());
        assert_eq!(prediction.value, rating_store::NEUTRAL_RATING);
        assert_eq!(prediction.basis, PredictionBasis::GlobalAverage);
    }
}
