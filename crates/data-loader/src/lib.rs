//! # Data Loader Crate
//!
//! Holds the rating data every collaborative-filtering computation reads.
//!
//! ## Main Components
//!
//! - **types**: `RatingMatrix` (sparse row → key → rating) and `RatingTable`
//!   (user view plus the derived item view)
//! - **parser**: Parse `::`-separated or JSON ratings files
//! - **index**: Build a `RatingTable` from files or rating records
//! - **sample**: The toy dataset checked by the validator
//! - **synthetic**: Seeded random tables for benchmarks
//! - **error**: Error types for loading and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Axis, RatingTable};
//! use std::path::Path;
//!
//! let table = RatingTable::load_from_file(Path::new("data/ratings.dat"))?;
//! let rated = table.rated_items("user1")?;
//! let co_rated = table.matrix(Axis::Users).common_keys("user1", "user2");
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod sample;
pub mod synthetic;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use sample::sample_ratings;
pub use types::{
    // Type aliases
    ItemId,
    UserId,
    // Core types
    Axis,
    Rating,
    RatingMatrix,
    RatingTable,
};
