//! Collaborative-filtering recommendations.
//!
//! This crate provides:
//! - `aggregate_scores`: weighted accumulation of neighbor ratings
//! - `generate_recommendations`: neighbor selection + aggregation in one call
//! - `UserBasedRecommender`: the same pipeline with configurable threshold,
//!   neighbor count and output limit
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::sample_ratings;
//! use recommender::generate_recommendations;
//!
//! let table = sample_ratings();
//! for rec in generate_recommendations(&table, "user1", 2)? {
//!     println!("{} {:.4}", rec.item_id, rec.score);
//! }
//! ```

pub mod aggregate;
pub mod types;
pub mod user_based;

// Re-export main types
pub use aggregate::aggregate_scores;
pub use types::{Recommendation, rank_recommendations};
pub use user_based::{UserBasedRecommender, generate_recommendations};
