//! Bulk ingestion, aggregates and integrity checks for the RatingStore.

use crate::error::{Result, StoreError};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::debug;

impl RatingStore {
    /// Load a store from a ratings file (see [`parser::parse_ratings`])
    pub fn load_from_file(path: &Path, scale: RatingScale) -> Result<Self> {
        let observations = parser::parse_ratings(path)?;
        let mut store = RatingStore::with_scale(scale);
        store.extend(observations)?;

        let (users, items, ratings) = store.counts();
        debug!(users, items, ratings, "Loaded rating store from {:?}", path);
        Ok(store)
    }

    /// Add every observation in order.
    ///
    /// Stops at the first invalid observation and returns its error;
    /// observations before it stay ingested.
    pub fn extend<I>(&mut self, observations: I) -> Result<usize>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut added = 0;
        for obs in observations {
            self.add_rating(obs.user_id, obs.item_id, obs.rating)?;
            added += 1;
        }
        Ok(added)
    }

    /// Mean of a user's ratings, `None` if the user has rated nothing
    pub fn user_average(&self, user: UserId) -> Option<f64> {
        mean(self.ratings_by_user(user).values().copied())
    }

    /// Mean over every rating in the store, [`NEUTRAL_RATING`] when empty
    pub fn global_average(&self) -> f64 {
        mean(self.by_user.values().flat_map(|m| m.values().copied())).unwrap_or(NEUTRAL_RATING)
    }

    /// Check that both indices hold the same observations
    pub fn validate(&self) -> Result<()> {
        for (&user, items) in &self.by_user {
            for (&item, &rating) in items {
                if self.by_item.get(&item).and_then(|m| m.get(&user)) != Some(&rating) {
                    return Err(StoreError::InconsistentIndex { user, item });
                }
            }
        }
        for (&item, users) in &self.by_item {
            for (&user, &rating) in users {
                if self.by_user.get(&user).and_then(|m| m.get(&item)) != Some(&rating) {
                    return Err(StoreError::InconsistentIndex { user, item });
                }
            }
        }
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
