//! Weighted score aggregation over a neighbor set.
//!
//! ## Algorithm
//! For every item a neighbor rated and the target did not:
//! `score[item] += similarity(target, neighbor) * neighbor_rating[item]`
//!
//! Scores are raw weighted sums. They are not divided by the number of
//! contributing neighbors or by the similarity total.

use crate::types::{Recommendation, rank_recommendations};
use anyhow::{Context, Result};
use data_loader::{Axis, RatingTable};
use similarity::Neighbor;
use std::collections::HashMap;
use tracing::debug;

/// Combine neighbor ratings into a ranked list for `target`.
///
/// Items already rated by `target` never appear in the output.
pub fn aggregate_scores(
    table: &RatingTable,
    target: &str,
    neighbors: &[Neighbor],
) -> Result<Vec<Recommendation>> {
    let rated = table
        .rated_items(target)
        .with_context(|| format!("Failed to look up ratings of user {}", target))?;

    // Contributions are added in neighbor order, so sums are reproducible
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for neighbor in neighbors {
        let ratings = table
            .ratings_of(Axis::Users, &neighbor.id)
            .with_context(|| format!("Failed to look up ratings of neighbor {}", neighbor.id))?;

        for (item_id, &rating) in ratings {
            if rated.contains(item_id.as_str()) {
                continue;
            }
            *scores.entry(item_id.as_str()).or_insert(0.0) += neighbor.similarity * rating;
        }
    }

    let mut recommendations: Vec<Recommendation> = scores
        .into_iter()
        .map(|(item_id, score)| Recommendation::new(item_id, score))
        .collect();
    rank_recommendations(&mut recommendations);

    debug!(
        "Aggregated {} candidate items from {} neighbors for {}",
        recommendations.len(),
        neighbors.len(),
        target
    );
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Rating, sample_ratings};

    #[test]
    fn test_raw_weighted_sum() {
        let table = RatingTable::from_ratings(vec![
            Rating::new("target", "seen", 4.0),
            Rating::new("n1", "seen", 4.0),
            Rating::new("n1", "x", 5.0),
            Rating::new("n2", "seen", 2.0),
            Rating::new("n2", "x", 3.0),
            Rating::new("n2", "y", 1.0),
        ])
        .unwrap();
        let neighbors = vec![Neighbor::new("n1", 0.5), Neighbor::new("n2", 0.25)];

        let recs = aggregate_scores(&table, "target", &neighbors).unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], Recommendation::new("x", 0.5 * 5.0 + 0.25 * 3.0));
        assert_eq!(recs[1], Recommendation::new("y", 0.25 * 1.0));
    }

    #[test]
    fn test_excludes_rated_items_even_when_neighbors_love_them() {
        let table = sample_ratings();
        // user2 rated only items user1 already rated
        let neighbors = vec![Neighbor::new("user2", 0.99)];

        let recs = aggregate_scores(&table, "user1", &neighbors).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_empty_neighbors() {
        let table = sample_ratings();
        let recs = aggregate_scores(&table, "user1", &[]).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unknown_target() {
        let table = sample_ratings();
        assert!(aggregate_scores(&table, "nobody", &[]).is_err());
    }

    #[test]
    fn test_unknown_neighbor() {
        let table = sample_ratings();
        let neighbors = vec![Neighbor::new("ghost", 0.5)];
        let err = aggregate_scores(&table, "user1", &neighbors).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
