//! Building a RatingTable from files or rating records.

use crate::error::Result;
use crate::parser;
use crate::types::{Rating, RatingTable};
use std::path::Path;
use tracing::info;

impl RatingTable {
    /// Load a ratings file.
    ///
    /// Files ending in `.json` are read as a user → item → rating object,
    /// everything else as `user::item::rating[::timestamp]` lines.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading ratings from {:?}", path);

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let ratings = if is_json {
            parser::parse_json(path)?
        } else {
            parser::parse_ratings(path)?
        };
        let table = RatingTable::from_ratings(ratings)?;

        let (users, items, ratings) = table.counts();
        info!(
            "Loaded {} users, {} items, {} ratings",
            users, items, ratings
        );
        Ok(table)
    }

    /// Build a table from individual ratings
    pub fn from_ratings(ratings: impl IntoIterator<Item = Rating>) -> Result<Self> {
        let mut table = RatingTable::new();
        for rating in ratings {
            table.insert_rating(rating)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use std::fs;

    #[test]
    fn test_from_ratings_rejects_duplicates() {
        let ratings = vec![
            Rating::new("user1", "item_a", 5.0),
            Rating::new("user1", "item_a", 4.0),
        ];
        let err = RatingTable::from_ratings(ratings).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateRating { .. }));
    }

    #[test]
    fn test_load_dat_and_json_agree() {
        let dir = tempfile::tempdir().unwrap();

        let dat_path = dir.path().join("ratings.dat");
        fs::write(&dat_path, "user1::item_a::5.0\nuser2::item_a::4.0\nuser2::item_b::2.0\n").unwrap();

        let json_path = dir.path().join("ratings.json");
        fs::write(
            &json_path,
            r#"{"user1": {"item_a": 5.0}, "user2": {"item_a": 4.0, "item_b": 2.0}}"#,
        )
        .unwrap();

        let from_dat = RatingTable::load_from_file(&dat_path).unwrap();
        let from_json = RatingTable::load_from_file(&json_path).unwrap();

        assert_eq!(from_dat.counts(), (2, 2, 3));
        assert_eq!(from_dat.by_user(), from_json.by_user());
        assert_eq!(from_dat.by_item(), from_json.by_item());
    }

    #[test]
    fn test_load_json_rejects_duplicate_rating() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("ratings.json");
        fs::write(&json_path, r#"{"user1": {"item_a": 5.0, "item_a": 1.0}}"#).unwrap();

        let err = RatingTable::load_from_file(&json_path).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateRating { .. }));
    }
}
