//! Seeded random rating tables for benchmarks and property tests.

use crate::error::{DataLoadError, Result};
use crate::types::{RatingMatrix, RatingTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Format a synthetic user id (`u0001`, `u0002`, ...)
pub fn user_id(index: usize) -> String {
    format!("u{:04}", index + 1)
}

/// Format a synthetic item id (`i0001`, `i0002`, ...)
pub fn item_id(index: usize) -> String {
    format!("i{:04}", index + 1)
}

/// Generate a random rating table.
///
/// Each (user, item) cell is rated with probability `density`, using
/// half-star values in [1.0, 5.0]. Every user ends up with at least one
/// rating. The same seed always yields the same table.
pub fn generate(users: usize, items: usize, density: f64, seed: u64) -> Result<RatingTable> {
    if !(density > 0.0 && density <= 1.0) {
        return Err(DataLoadError::InvalidValue {
            field: "density".to_string(),
            value: density.to_string(),
        });
    }
    if items == 0 {
        return Err(DataLoadError::InvalidValue {
            field: "items".to_string(),
            value: items.to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut by_user = RatingMatrix::new();

    for u in 0..users {
        let uid = user_id(u);
        for i in 0..items {
            if rng.random_bool(density) {
                by_user.insert(&uid, &item_id(i), random_stars(&mut rng));
            }
        }
        if !by_user.contains_row(&uid) {
            let i = rng.random_range(0..items);
            by_user.insert(&uid, &item_id(i), random_stars(&mut rng));
        }
    }

    debug!(
        "Generated synthetic table: {} users, {} items, {} ratings",
        by_user.len(),
        items,
        by_user.rating_count()
    );
    Ok(RatingTable::from_user_matrix(by_user))
}

fn random_stars(rng: &mut StdRng) -> f64 {
    rng.random_range(2..=10u32) as f64 / 2.0
}
