//! Prediction and recommendation result types.

use rating_store::ItemId;
use serde::{Deserialize, Serialize};

/// Where a predicted rating came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PredictionBasis {
    /// Similarity-weighted average over this many of the user's rated items
    Neighborhood { neighbors: usize },
    /// No similar rated items; the user's own mean rating
    UserAverage,
    /// The user has no ratings; the mean over the whole store
    GlobalAverage,
}

/// A predicted rating together with how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub value: f64,
    pub basis: PredictionBasis,
}

/// One ranked entry of a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: ItemId,
    pub predicted_rating: f64,
    pub basis: PredictionBasis,
}

impl Recommendation {
    pub fn new(item_id: ItemId, prediction: Prediction) -> Self {
        Self {
            item_id,
            predicted_rating: prediction.value,
            basis: prediction.basis,
        }
    }
}
