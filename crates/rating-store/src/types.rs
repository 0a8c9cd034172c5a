//! Core domain types for rating observations.
//!
//! This module defines the identifiers, the rating scale, and the
//! [`RatingStore`] itself: two sparse indices (by user and by item) that are
//! only ever mutated together.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier for a user
pub type UserId = u32;

/// Opaque identifier for an item
pub type ItemId = u32;

/// Ratings given by one user, keyed by item
pub type ItemRatings = BTreeMap<ItemId, f64>;

/// Ratings received by one item, keyed by user
pub type UserRatings = BTreeMap<UserId, f64>;

/// Rating used when there is nothing at all to average over
pub const NEUTRAL_RATING: f64 = 3.0;

static EMPTY_ITEM_RATINGS: ItemRatings = BTreeMap::new();
static EMPTY_USER_RATINGS: UserRatings = BTreeMap::new();

// =============================================================================
// Observations
// =============================================================================

/// A single (user, item, rating) triple as supplied by an ingestion source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
}

impl Observation {
    pub fn new(user_id: UserId, item_id: ItemId, rating: f64) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

/// Inclusive range of accepted rating values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl RatingScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Accepts any finite value
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for RatingScale {
    /// The conventional 1-5 star scale
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

// =============================================================================
// RatingStore
// =============================================================================

/// In-memory store of sparse user/item ratings.
///
/// Both indices hold the same observations:
/// `by_user[u][i] == r` exactly when `by_item[i][u] == r`.
/// Ordered maps keep every traversal (and every floating point sum built on
/// top of one) reproducible from run to run.
#[derive(Debug, Clone)]
pub struct RatingStore {
    pub(crate) by_user: BTreeMap<UserId, ItemRatings>,
    pub(crate) by_item: BTreeMap<ItemId, UserRatings>,
    pub(crate) scale: RatingScale,
}

impl RatingStore {
    /// Creates an empty store that accepts ratings on the default 1-5 scale
    pub fn new() -> Self {
        Self::with_scale(RatingScale::default())
    }

    /// Creates an empty store with a custom accepted rating range
    pub fn with_scale(scale: RatingScale) -> Self {
        Self {
            by_user: BTreeMap::new(),
            by_item: BTreeMap::new(),
            scale,
        }
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    /// Insert or overwrite the rating for (user, item).
    ///
    /// The value is checked before either index is touched, so a rejected
    /// rating leaves the store exactly as it was.
    pub fn add_rating(&mut self, user: UserId, item: ItemId, rating: f64) -> Result<()> {
        if !rating.is_finite() {
            return Err(StoreError::NonFiniteRating { user, item });
        }
        if !self.scale.contains(rating) {
            return Err(StoreError::RatingOutOfRange {
                user,
                item,
                value: rating,
                min: self.scale.min,
                max: self.scale.max,
            });
        }

        self.by_user.entry(user).or_default().insert(item, rating);
        self.by_item.entry(item).or_default().insert(user, rating);
        Ok(())
    }

    /// Ratings made by a user; empty if the user is unknown
    pub fn ratings_by_user(&self, user: UserId) -> &ItemRatings {
        self.by_user.get(&user).unwrap_or(&EMPTY_ITEM_RATINGS)
    }

    /// Ratings received by an item; empty if the item is unknown
    pub fn raters_of(&self, item: ItemId) -> &UserRatings {
        self.by_item.get(&item).unwrap_or(&EMPTY_USER_RATINGS)
    }

    /// The rating a user gave an item, if any
    pub fn rating(&self, user: UserId, item: ItemId) -> Option<f64> {
        self.by_user.get(&user)?.get(&item).copied()
    }

    /// All known items, ascending
    pub fn all_items(&self) -> Vec<ItemId> {
        self.by_item.keys().copied().collect()
    }

    /// All known users, ascending
    pub fn all_users(&self) -> Vec<UserId> {
        self.by_user.keys().copied().collect()
    }

    /// (users, items, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.by_user.values().map(|m| m.len()).sum();
        (self.by_user.len(), self.by_item.len(), total_ratings)
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

impl Default for RatingStore {
    fn default() -> Self {
        Self::new()
    }
}
