//! Error types for the rating-store crate.
//!
//! Only structurally invalid input surfaces as an error. Lookups of unknown
//! users or items are never errors; they degrade to empty results.

use crate::types::{ItemId, UserId};
use thiserror::Error;

/// Errors that can occur while ingesting or checking rating observations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Ratings file could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a ratings file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a ratings file couldn't be parsed
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// Rating value is NaN or infinite
    #[error("Rating for user {user} on item {item} is not a finite number")]
    NonFiniteRating { user: UserId, item: ItemId },

    /// Rating value lies outside the store's declared scale
    #[error("Rating {value} for user {user} on item {item} is outside [{min}, {max}]")]
    RatingOutOfRange {
        user: UserId,
        item: ItemId,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The by-user and by-item indices disagree about a (user, item) entry
    #[error("Indices disagree on the rating for user {user} and item {item}")]
    InconsistentIndex { user: UserId, item: ItemId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
