//! # Similarity Crate
//!
//! Item-to-item similarity for collaborative filtering.
//!
//! ## Components
//!
//! ### SimilarityEngine
//! Cosine similarity between the rating vectors of two items, and the
//! all-pairs computation that builds a matrix from a whole store.
//!
//! ### ItemSimilarityMatrix
//! Sparse, symmetric pair scores with neighbor lookups.
//!
//! ## Example Usage
//!
//! ```
//! use rating_store::sample_store;
//! use similarity::SimilarityEngine;
//! use std::sync::Arc;
//!
//! let engine = SimilarityEngine::new(Arc::new(sample_store()));
//! let matrix = engine.compute_all();
//!
//! assert_eq!(matrix.get(101, 102), matrix.get(102, 101));
//! assert!(matrix.get(102, 106).is_none());
//! ```

pub mod engine;
pub mod matrix;

pub use engine::{NormScope, SimilarityEngine};
pub use matrix::{ItemSimilarityMatrix, Neighbors};

#[cfg(test)]
mod tests {
    use super::*;
    use rating_store::RatingStore;
    use std::sync::Arc;

    #[test]
    fn test_empty_store_yields_empty_matrix() {
        let engine = SimilarityEngine::new(Arc::new(RatingStore::new()));
        let matrix = engine.compute_all();

        assert!(matrix.is_empty());
        assert!(matrix.neighbors(1).is_empty());
    }

    #[test]
    fn test_single_item_yields_empty_matrix() {
        let mut store = RatingStore::new();
        store.add_rating(1, 10, 4.0).unwrap();
        store.add_rating(2, 10, 5.0).unwrap();

        let matrix = SimilarityEngine::new(Arc::new(store)).compute_all();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_defaults() {
        let engine = SimilarityEngine::new(Arc::new(RatingStore::new()));
        assert_eq!(engine.norm_scope(), NormScope::AllRaters);
        assert_eq!(engine.min_similarity(), 0.0);
    }
}
