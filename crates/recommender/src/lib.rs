//! Rating prediction and top-N recommendation.
//!
//! This crate provides:
//! - [`RatingPredictor`] trait for rating prediction models
//! - [`Predictor`]: similarity-weighted average with user/global fallbacks
//! - [`Recommender`]: deterministic top-N ranking of unrated items
//!
//! ## Architecture
//! 1. The caller builds an `ItemSimilarityMatrix` from a `RatingStore`
//! 2. The Recommender lists the items the user has not rated
//! 3. The predictor scores each candidate
//! 4. Candidates are sorted and cut to `top_n`
//!
//! ## Example Usage
//! ```
//! use rating_store::sample_store;
//! use recommender::{Predictor, RatingPredictor, Recommender};
//! use similarity::SimilarityEngine;
//! use std::sync::Arc;
//!
//! let store = Arc::new(sample_store());
//! let matrix = SimilarityEngine::new(store.clone()).compute_all();
//!
//! let predicted = Predictor::new(store.clone()).predict_rating(3, 102, &matrix);
//! let top = Recommender::new(store).recommend(3, 5, &matrix);
//! assert_eq!(top[0].item_id, 102);
//! assert_eq!(top[0].predicted_rating, predicted);
//! ```

pub mod predictor;
pub mod recommender;
pub mod traits;
pub mod types;

// Re-export main types
pub use predictor::Predictor;
pub use recommender::Recommender;
pub use traits::RatingPredictor;
pub use types::{Prediction, PredictionBasis, Recommendation};
