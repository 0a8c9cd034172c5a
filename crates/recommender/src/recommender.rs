//! Top-N ranking of unrated items.
//!
//! The Recommender predicts a rating for every item the user has not rated
//! and returns the best `top_n` of them.

use crate::predictor::Predictor;
use crate::traits::RatingPredictor;
use crate::types::Recommendation;
use rating_store::{ItemId, RatingStore, UserId};
use rayon::prelude::*;
use similarity::ItemSimilarityMatrix;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks candidate items for a user by predicted rating.
///
/// ## Usage
/// ```
/// use rating_store::sample_store;
/// use recommender::Recommender;
/// use similarity::SimilarityEngine;
/// use std::sync::Arc;
///
/// let store = Arc::new(sample_store());
/// let matrix = SimilarityEngine::new(store.clone()).compute_all();
/// let recommender = Recommender::new(store);
///
/// let top = recommender.recommend(3, 2, &matrix);
/// assert_eq!(top.len(), 2);
/// ```
pub struct Recommender<P = Predictor> {
    store: Arc<RatingStore>,
    predictor: P,
}

impl Recommender<Predictor> {
    /// Recommender using the item-neighborhood [`Predictor`]
    pub fn new(store: Arc<RatingStore>) -> Self {
        let predictor = Predictor::new(store.clone());
        Self { store, predictor }
    }
}

impl<P: RatingPredictor> Recommender<P> {
    /// Recommender using any predictor
    pub fn with_predictor(store: Arc<RatingStore>, predictor: P) -> Self {
        Self { store, predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Items in the store the user has not rated, ascending
    pub fn candidates(&self, user: UserId) -> Vec<ItemId> {
        let rated = self.store.ratings_by_user(user);
        self.store
            .all_items()
            .into_iter()
            .filter(|item| !rated.contains_key(item))
            .collect()
    }

    /// Up to `top_n` unrated items, highest predicted rating first.
    ///
    /// Equal predictions are ordered by ascending item id, so the output is
    /// the same on every call. Asking for more items than there are
    /// candidates returns all of them.
    #[instrument(skip(self, matrix), fields(predictor = self.predictor.name()))]
    pub fn recommend(
        &self,
        user: UserId,
        top_n: usize,
        matrix: &ItemSimilarityMatrix,
    ) -> Vec<Recommendation> {
        let candidates = self.candidates(user);
        debug!("Scoring {} candidates", candidates.len());

        let mut ranked: Vec<Recommendation> = candidates
            .par_iter()
            .map(|&item| Recommendation::new(item, self.predictor.predict(user, item, matrix)))
            .collect();

        ranked.sort_by(rank_order);
        ranked.truncate(top_n);

        debug!("Returning {} recommendations", ranked.len());
        ranked
    }
}

/// Predicted rating descending, then item id ascending
fn rank_order(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.predicted_rating
        .total_cmp(&a.predicted_rating)
        .then_with(|| a.item_id.cmp(&b.item_id))
}
