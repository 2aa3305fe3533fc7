//! # Similarity Crate
//!
//! Similarity measures and neighbor selection for collaborative filtering.
//!
//! ## Components
//!
//! ### Cosine
//! Plain cosine similarity of two paired vectors, `0.0` for a zero vector.
//!
//! ### Entity similarity
//! User-user and item-item similarity. Both restrict the two rating rows to
//! their co-rated keys and run cosine over them; the only difference is which
//! view of the [`RatingTable`](data_loader::RatingTable) is read.
//!
//! ### Neighbors
//! Threshold + top-K selection of the most similar entities.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{sample_ratings, Axis};
//! use similarity::{nearest_neighbors, user_similarity};
//!
//! let table = sample_ratings();
//! let sim = user_similarity(&table, "user1", "user2")?;
//! let neighbors = nearest_neighbors(&table, Axis::Users, "user1", 0.1, 3)?;
//! ```

// Public modules
pub mod cosine;
pub mod entity;
pub mod neighbors;

// Re-export commonly used items
pub use cosine::{cosine_similarity, within_unit_range};
pub use entity::{entity_similarity, item_similarity, user_similarity};
pub use neighbors::{
    DEFAULT_NEIGHBORS, DEFAULT_SIMILARITY_THRESHOLD, Neighbor, nearest_neighbors,
};
