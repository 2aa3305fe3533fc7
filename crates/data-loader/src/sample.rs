//! The toy dataset used by the validation run.

use crate::types::{RatingMatrix, RatingTable};

/// Literal ratings: three users, five items.
const SAMPLE_RATINGS: &[(&str, &str, f64)] = &[
    ("user1", "item_a", 5.0),
    ("user1", "item_b", 3.0),
    ("user1", "item_c", 4.0),
    ("user2", "item_a", 4.5),
    ("user2", "item_b", 3.5),
    ("user2", "item_c", 4.5),
    ("user3", "item_a", 2.0),
    ("user3", "item_b", 5.0),
    ("user3", "item_d", 5.0),
    ("user3", "item_e", 4.0),
];

/// Build the sample rating table
pub fn sample_ratings() -> RatingTable {
    let mut by_user = RatingMatrix::new();
    for &(user_id, item_id, rating) in SAMPLE_RATINGS {
        by_user.insert(user_id, item_id, rating);
    }
    RatingTable::from_user_matrix(by_user)
}
