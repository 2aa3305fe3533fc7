//! User-based collaborative filtering
//!
//! "Users who rate like you also rated these items":
//! 1. Select the target's nearest neighbors among all other users
//! 2. Accumulate their ratings of items the target has not rated,
//!    weighted by similarity
//! 3. Rank by accumulated score

use crate::aggregate::aggregate_scores;
use crate::types::Recommendation;
use anyhow::{Context, Result};
use data_loader::{Axis, RatingTable};
use similarity::{DEFAULT_NEIGHBORS, DEFAULT_SIMILARITY_THRESHOLD, Neighbor, nearest_neighbors};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Recommend items for `target` from its `k` nearest neighbors.
///
/// Uses the default similarity threshold (0.1). Returns every scored item,
/// best first.
pub fn generate_recommendations(
    table: &RatingTable,
    target: &str,
    k: usize,
) -> Result<Vec<Recommendation>> {
    recommend_from_neighbors(table, target, DEFAULT_SIMILARITY_THRESHOLD, k)
}

fn recommend_from_neighbors(
    table: &RatingTable,
    target: &str,
    threshold: f64,
    k: usize,
) -> Result<Vec<Recommendation>> {
    let neighbors = select_neighbors(table, target, threshold, k)?;
    if neighbors.is_empty() {
        warn!(
            "No users above similarity {} for user {}, nothing to recommend",
            threshold, target
        );
        return Ok(Vec::new());
    }
    aggregate_scores(table, target, &neighbors)
}

fn select_neighbors(
    table: &RatingTable,
    target: &str,
    threshold: f64,
    k: usize,
) -> Result<Vec<Neighbor>> {
    nearest_neighbors(table, Axis::Users, target, threshold, k)
        .with_context(|| format!("Failed to select neighbors for user {}", target))
}

/// Configurable user-based recommender over a shared rating table.
///
/// ## Usage
/// ```ignore
/// let recommender = UserBasedRecommender::new(table.clone())
///     .with_neighbors(2)
///     .with_limit(10);
/// let recs = recommender.recommend("user1")?;
/// ```
#[derive(Debug, Clone)]
pub struct UserBasedRecommender {
    /// Shared reference to the rating table (read-only, so no Mutex needed)
    table: Arc<RatingTable>,

    /// Neighbors must be strictly more similar than this
    similarity_threshold: f64,

    /// Number of neighbors whose ratings are aggregated
    neighbors: usize,

    /// Optional cap on the number of returned items
    limit: Option<usize>,
}

impl UserBasedRecommender {
    /// Create a recommender with the default threshold (0.1) and K (3)
    pub fn new(table: Arc<RatingTable>) -> Self {
        Self {
            table,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            neighbors: DEFAULT_NEIGHBORS,
            limit: None,
        }
    }

    /// Configure the neighbor similarity threshold (default: 0.1)
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Configure how many neighbors to use (default: 3)
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    /// Truncate the ranked output to `limit` items (default: no limit)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// The neighbors `recommend` would aggregate over
    pub fn neighbors_of(&self, user_id: &str) -> Result<Vec<Neighbor>> {
        select_neighbors(&self.table, user_id, self.similarity_threshold, self.neighbors)
    }

    /// Ranked recommendations for a user
    #[instrument(skip(self), fields(k = self.neighbors))]
    pub fn recommend(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        let mut recommendations = recommend_from_neighbors(
            &self.table,
            user_id,
            self.similarity_threshold,
            self.neighbors,
        )?;

        if let Some(limit) = self.limit {
            recommendations.truncate(limit);
        }

        debug!(
            "Generated {} recommendations for user {}",
            recommendations.len(),
            user_id
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::sample_ratings;

    #[test]
    fn test_generate_recommendations_sample() {
        let table = sample_ratings();
        let recs = generate_recommendations(&table, "user1", 2).unwrap();

        let ids: Vec<&str> = recs.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["item_d", "item_e"]);

        // Only user3 contributes: similarity * 5.0 and similarity * 4.0
        let sim_u1_u3 = similarity::user_similarity(&table, "user1", "user3").unwrap();
        assert_eq!(recs[0].score, sim_u1_u3 * 5.0);
        assert_eq!(recs[1].score, sim_u1_u3 * 4.0);
    }

    #[test]
    fn test_k_one_uses_only_closest_neighbor() {
        let table = sample_ratings();
        // user1's closest neighbor is user2, who rated nothing new
        let recs = generate_recommendations(&table, "user1", 1).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_recommender_builder() {
        let table = Arc::new(sample_ratings());
        let recommender = UserBasedRecommender::new(table)
            .with_neighbors(2)
            .with_limit(1);

        let recs = recommender.recommend("user1").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item_id, "item_d");
    }

    #[test]
    fn test_high_threshold_yields_nothing() {
        let table = Arc::new(sample_ratings());
        let recommender = UserBasedRecommender::new(table).with_similarity_threshold(0.9999);

        assert!(recommender.neighbors_of("user1").unwrap().is_empty());
        assert!(recommender.recommend("user1").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_user() {
        let table = Arc::new(sample_ratings());
        let err = UserBasedRecommender::new(table)
            .recommend("user42")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("user42"));
    }
}
