//! Built-in sample dataset.
//!
//! Six users and seven items. User 3 has rated items 101, 104, 105 and 107,
//! which leaves 102, 103 and 106 as recommendation candidates.

use crate::error::Result;
use crate::types::{Observation, RatingScale, RatingStore};

/// The sample observations, in ingestion order
pub const SAMPLE_RATINGS: [(u32, u32, f64); 24] = [
    (1, 101, 5.0),
    (1, 102, 3.0),
    (1, 103, 2.5),
    (2, 101, 2.0),
    (2, 102, 2.5),
    (2, 103, 5.0),
    (2, 104, 2.0),
    (3, 101, 2.5),
    (3, 104, 4.0),
    (3, 105, 4.5),
    (3, 107, 5.0),
    (4, 101, 5.0),
    (4, 103, 3.0),
    (4, 104, 4.5),
    (4, 106, 4.0),
    (5, 102, 3.5),
    (5, 103, 4.0),
    (5, 105, 2.0),
    (5, 107, 3.5),
    (6, 101, 3.0),
    (6, 102, 4.0),
    (6, 103, 2.0),
    (6, 104, 3.0),
    (6, 105, 3.0),
];

pub fn sample_observations() -> impl Iterator<Item = Observation> {
    SAMPLE_RATINGS
        .iter()
        .map(|&(user, item, rating)| Observation::new(user, item, rating))
}

/// A store holding the sample dataset on the default 1-5 scale
pub fn sample_store() -> RatingStore {
    sample_store_with_scale(RatingScale::default())
        .expect("sample ratings lie on the default scale")
}

/// A store holding the sample dataset on a custom scale.
///
/// Fails on the first sample rating the scale rejects.
pub fn sample_store_with_scale(scale: RatingScale) -> Result<RatingStore> {
    let mut store = RatingStore::with_scale(scale);
    store.extend(sample_observations())?;
    Ok(store)
}
