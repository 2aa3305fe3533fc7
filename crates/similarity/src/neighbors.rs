//! Neighbor selection - the most similar entities to a target
//!
//! ## Algorithm
//! 1. Score the target against every other entity on the same axis
//!    (in parallel with Rayon; each pair is independent)
//! 2. Keep entities strictly above the similarity threshold
//! 3. Sort by similarity DESC, then id ASC for equal similarities
//! 4. Keep the top K

use crate::entity::entity_similarity;
use data_loader::{Axis, RatingTable, Result};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Minimum similarity (exclusive) for an entity to count as a neighbor
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.1;

/// Number of neighbors kept by default
pub const DEFAULT_NEIGHBORS: usize = 3;

/// An entity similar to the target, with its similarity weight
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub similarity: f64,
}

impl Neighbor {
    pub fn new(id: impl Into<String>, similarity: f64) -> Self {
        Self {
            id: id.into(),
            similarity,
        }
    }
}

/// Find the `k` entities most similar to `target` on `axis`.
///
/// Only entities with similarity strictly above `threshold` are kept; the
/// result may be shorter than `k`, or empty.
#[instrument(level = "debug", skip(table))]
pub fn nearest_neighbors(
    table: &RatingTable,
    axis: Axis,
    target: &str,
    threshold: f64,
    k: usize,
) -> Result<Vec<Neighbor>> {
    // Fail on an unknown target even when there is nobody to compare with
    table.ratings_of(axis, target)?;

    let others: Vec<&str> = table
        .matrix(axis)
        .row_ids()
        .into_iter()
        .filter(|id| *id != target)
        .collect();

    let scored = others
        .par_iter()
        .map(|&id| entity_similarity(table, axis, target, id).map(|sim| Neighbor::new(id, sim)))
        .collect::<Result<Vec<Neighbor>>>()?;

    let mut neighbors: Vec<Neighbor> = scored
        .into_iter()
        .filter(|neighbor| neighbor.similarity > threshold)
        .collect();

    rank_neighbors(&mut neighbors);
    neighbors.truncate(k);

    debug!(
        "Selected {} of {} candidate {} neighbors for {}",
        neighbors.len(),
        others.len(),
        axis,
        target
    );
    Ok(neighbors)
}

/// Sort neighbors by similarity DESC, breaking ties by id ASC
pub fn rank_neighbors(neighbors: &mut [Neighbor]) {
    neighbors.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}
