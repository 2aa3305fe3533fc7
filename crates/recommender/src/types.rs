//! Output types of the recommender.

use data_loader::ItemId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A recommended item and its accumulated score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: ItemId,
    /// Sum of `similarity * rating` over the neighbors who rated the item
    pub score: f64,
}

impl Recommendation {
    pub fn new(item_id: impl Into<ItemId>, score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            score,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:.4})", self.item_id, self.score)
    }
}

/// Sort by score DESC, breaking ties by item id ASC
pub fn rank_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
}
