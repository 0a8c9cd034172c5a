//! # Rating Store Crate
//!
//! Holds sparse (user, item, rating) observations for item-based
//! collaborative filtering.
//!
//! ## Main Components
//!
//! - **types**: Identifiers, [`RatingScale`], and the dual-index [`RatingStore`]
//! - **store**: Bulk ingestion, averages, and integrity checks
//! - **parser**: Read rating triples from text files
//! - **sample**: The built-in sample dataset
//! - **error**: Error types for ingestion
//!
//! ## Example Usage
//!
//! ```
//! use rating_store::RatingStore;
//!
//! let mut store = RatingStore::new();
//! store.add_rating(1, 101, 5.0)?;
//! store.add_rating(2, 101, 3.0)?;
//!
//! assert_eq!(store.raters_of(101).len(), 2);
//! assert!(store.ratings_by_user(42).is_empty());
//! # Ok::<(), rating_store::StoreError>(())
//! ```

pub mod error;
pub mod parser;
pub mod sample;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use sample::{sample_store, sample_store_with_scale};
pub use types::{
    ItemId, ItemRatings, NEUTRAL_RATING, Observation, RatingScale, RatingStore, UserId,
    UserRatings,
};
