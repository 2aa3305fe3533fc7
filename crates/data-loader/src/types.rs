//! Core domain types for rating data.
//!
//! A rating table is stored twice: once keyed by user (user → item → rating)
//! and once keyed by item (item → user → rating). Both views are kept in sync
//! on insert, so user-user and item-item computations read from dual tables
//! through the same [`RatingMatrix`] API.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user (e.g. `"user1"`)
pub type UserId = String;

/// Identifier of an item (e.g. `"item_a"`)
pub type ItemId = String;

// =============================================================================
// Axis
// =============================================================================

/// Which side of the rating table an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rows are users, keys are the items they rated
    Users,
    /// Rows are items, keys are the users who rated them
    Items,
}

impl Axis {
    /// Entity name used in error messages and logs
    pub fn entity_name(self) -> &'static str {
        match self {
            Axis::Users => "User",
            Axis::Items => "Item",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_name())
    }
}

// =============================================================================
// Rating
// =============================================================================

/// A single rating of an item by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: impl Into<UserId>, item_id: impl Into<ItemId>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            rating,
        }
    }
}

// =============================================================================
// RatingMatrix
// =============================================================================

/// Sparse matrix of ratings: row id → (key id → rating).
///
/// An unrated cell is an absent key, never a stored zero. Serializes as a
/// plain JSON object of objects, e.g. `{"user1": {"item_a": 5.0}}`; reading
/// that format back goes through `parser::parse_json` so duplicates are caught.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingMatrix {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl RatingMatrix {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Set a cell, returning the previous value if one was stored
    pub fn insert(&mut self, row: &str, key: &str, value: f64) -> Option<f64> {
        self.rows
            .entry(row.to_string())
            .or_default()
            .insert(key.to_string(), value)
    }

    /// All ratings of one row
    pub fn row(&self, id: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(id)
    }

    /// A single cell
    pub fn get(&self, row: &str, key: &str) -> Option<f64> {
        self.rows.get(row)?.get(key).copied()
    }

    pub fn contains_row(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Keys rated in a row (empty set for an unknown row)
    pub fn rated_keys(&self, id: &str) -> HashSet<&str> {
        self.rows
            .get(id)
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Keys rated in both rows, sorted ascending.
    ///
    /// The order is fixed so that `common_keys(a, b)` and `common_keys(b, a)`
    /// produce identical vectors downstream.
    pub fn common_keys<'a>(&'a self, a: &str, b: &str) -> Vec<&'a str> {
        let (Some(row_a), Some(row_b)) = (self.rows.get(a), self.rows.get(b)) else {
            return Vec::new();
        };

        let mut common: Vec<&str> = row_a
            .keys()
            .filter(|key| row_b.contains_key(*key))
            .map(String::as_str)
            .collect();
        common.sort_unstable();
        common
    }

    /// Row ids sorted ascending
    pub fn row_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of stored cells
    pub fn rating_count(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    /// Swap rows and keys
    pub fn transpose(&self) -> RatingMatrix {
        let mut transposed = RatingMatrix::new();
        for (row, ratings) in &self.rows {
            for (key, &value) in ratings {
                transposed.insert(key, row, value);
            }
        }
        transposed
    }
}

// =============================================================================
// RatingTable
// =============================================================================

/// User → item ratings together with the derived item → user transpose.
///
/// Built once, then shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    by_user: RatingMatrix,
    by_item: RatingMatrix,
}

impl RatingTable {
    /// Creates a new, empty RatingTable
    pub fn new() -> Self {
        Self {
            by_user: RatingMatrix::new(),
            by_item: RatingMatrix::new(),
        }
    }

    /// Build from a user-keyed matrix, deriving the item view once
    pub fn from_user_matrix(by_user: RatingMatrix) -> Self {
        let by_item = by_user.transpose();
        Self { by_user, by_item }
    }

    /// Insert a rating into both views.
    ///
    /// Rejects non-finite values and a second rating for the same pair.
    pub fn insert_rating(&mut self, rating: Rating) -> Result<()> {
        if !rating.rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: rating.rating.to_string(),
            });
        }
        if self.by_user.get(&rating.user_id, &rating.item_id).is_some() {
            return Err(DataLoadError::DuplicateRating {
                user_id: rating.user_id,
                item_id: rating.item_id,
            });
        }

        self.by_user
            .insert(&rating.user_id, &rating.item_id, rating.rating);
        self.by_item
            .insert(&rating.item_id, &rating.user_id, rating.rating);
        Ok(())
    }

    /// The matrix whose rows live on `axis`
    pub fn matrix(&self, axis: Axis) -> &RatingMatrix {
        match axis {
            Axis::Users => &self.by_user,
            Axis::Items => &self.by_item,
        }
    }

    pub fn by_user(&self) -> &RatingMatrix {
        &self.by_user
    }

    pub fn by_item(&self) -> &RatingMatrix {
        &self.by_item
    }

    /// Ratings of one entity on `axis`, or `MissingReference`
    pub fn ratings_of(&self, axis: Axis, id: &str) -> Result<&HashMap<String, f64>> {
        self.matrix(axis)
            .row(id)
            .ok_or_else(|| DataLoadError::MissingReference {
                entity: axis.entity_name().to_string(),
                id: id.to_string(),
            })
    }

    /// Items already rated by a user
    pub fn rated_items(&self, user_id: &str) -> Result<HashSet<&str>> {
        let ratings = self.ratings_of(Axis::Users, user_id)?;
        Ok(ratings.keys().map(String::as_str).collect())
    }

    /// User ids sorted ascending
    pub fn user_ids(&self) -> Vec<&str> {
        self.by_user.row_ids()
    }

    /// Item ids sorted ascending
    pub fn item_ids(&self) -> Vec<&str> {
        self.by_item.row_ids()
    }

    /// (users, items, ratings) for logging and sanity checks
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.by_user.len(),
            self.by_item.len(),
            self.by_user.rating_count(),
        )
    }
}
