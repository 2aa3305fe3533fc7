//! Similarity between two users or two items of a rating table.
//!
//! Both directions go through [`entity_similarity`], which only differs in the
//! matrix it reads: user rows keyed by item, or item rows keyed by user.

use crate::cosine::cosine_similarity;
use data_loader::{Axis, RatingTable, Result};

/// Cosine similarity of two entities on `axis`, restricted to co-rated keys.
///
/// Returns `0.0` when the two entities share no keys. Either id missing from
/// the table is a `MissingReference` error.
pub fn entity_similarity(table: &RatingTable, axis: Axis, a: &str, b: &str) -> Result<f64> {
    let ratings_a = table.ratings_of(axis, a)?;
    let ratings_b = table.ratings_of(axis, b)?;

    let common = table.matrix(axis).common_keys(a, b);
    if common.is_empty() {
        return Ok(0.0);
    }

    let v1: Vec<f64> = common.iter().map(|key| ratings_a[*key]).collect();
    let v2: Vec<f64> = common.iter().map(|key| ratings_b[*key]).collect();

    Ok(cosine_similarity(&v1, &v2))
}

/// Similarity of two users over the items both rated
pub fn user_similarity(table: &RatingTable, user_a: &str, user_b: &str) -> Result<f64> {
    entity_similarity(table, Axis::Users, user_a, user_b)
}

/// Similarity of two items over the users who rated both
pub fn item_similarity(table: &RatingTable, item_a: &str, item_b: &str) -> Result<f64> {
    entity_similarity(table, Axis::Items, item_a, item_b)
}
