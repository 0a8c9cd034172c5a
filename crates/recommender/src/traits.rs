//! Core traits for rating prediction.
//!
//! The [`Recommender`](crate::Recommender) ranks candidates through this trait,
//! so alternative prediction models can be ranked the same way.

use crate::types::Prediction;
use rating_store::{ItemId, UserId};
use similarity::ItemSimilarityMatrix;

/// Estimates the rating a user would give an item.
///
/// `Send + Sync` lets candidates be scored in parallel.
pub trait RatingPredictor: Send + Sync {
    /// Returns the name of this predictor (for logging/debugging)
    fn name(&self) -> &str;

    /// Predict `user`'s rating of `item`. Never fails; implementations fall
    /// back to aggregate ratings when there is nothing specific to go on.
    fn predict(&self, user: UserId, item: ItemId, matrix: &ItemSimilarityMatrix) -> Prediction;

    /// Just the predicted value
    fn predict_rating(&self, user: UserId, item: ItemId, matrix: &ItemSimilarityMatrix) -> f64 {
        self.predict(user, item, matrix).value
    }
}
