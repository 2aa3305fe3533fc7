//! Parsers for ratings files.
//!
//! Two formats are accepted:
//! - `.dat` style text: `userId::itemId::rating[::timestamp]`, one per line
//! - JSON: `{"user1": {"item_a": 5.0, ...}, ...}`

use crate::error::{DataLoadError, Result};
use crate::types::Rating;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse a `::`-separated ratings file from disk
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let content = read_file(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_ratings_str(&content, &file_name)
}

/// Parse `::`-separated ratings text.
///
/// `file` is only used to label parse errors.
pub fn parse_ratings_str(content: &str, file: &str) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line_trimmed.split("::").map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(DataLoadError::FieldCountMismatch {
                expected: "3 or 4".to_string(),
                found: parts.len(),
                line: line_no,
            });
        }

        let user_id = parts[0];
        let item_id = parts[1];
        if user_id.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing userId".to_string(),
            });
        }
        if item_id.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing itemId".to_string(),
            });
        }

        let rating: f64 = parts[2].parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid rating: {}", e),
        })?;

        // Timestamp is accepted for MovieLens-style files but not used
        if let Some(timestamp) = parts.get(3) {
            timestamp
                .parse::<i64>()
                .map_err(|e| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Invalid timestamp: {}", e),
                })?;
        }

        ratings.push(Rating::new(user_id, item_id, rating));
    }

    Ok(ratings)
}

/// Parse a JSON ratings file from disk
pub fn parse_json(path: &Path) -> Result<Vec<Rating>> {
    let content = read_file(path)?;
    parse_json_str(&content)
}

/// Parse JSON ratings text (`{user: {item: rating}}`) into rating records.
///
/// Repeated keys are kept, so a user rating the same item twice reaches
/// `RatingTable::insert_rating` twice and is rejected there.
pub fn parse_json_str(content: &str) -> Result<Vec<Rating>> {
    let users: Entries<Entries<f64>> = serde_json::from_str(content)?;

    let mut ratings = Vec::new();
    for (user_id, items) in users.0 {
        if user_id.trim().is_empty() {
            return Err(empty_id("userId"));
        }
        for (item_id, rating) in items.0 {
            if item_id.trim().is_empty() {
                return Err(empty_id("itemId"));
            }
            ratings.push(Rating::new(user_id.as_str(), item_id, rating));
        }
    }
    Ok(ratings)
}

fn empty_id(field: &str) -> DataLoadError {
    DataLoadError::InvalidValue {
        field: field.to_string(),
        value: "(empty)".to_string(),
    }
}

/// A JSON object as key/value pairs in file order, repeated keys included
struct Entries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratings_str() {
        let content = "user1::item_a::5.0\n\nuser1::item_b::3\nuser2::item_a::4.5::978300760\n";
        let ratings = parse_ratings_str(content, "ratings.dat").unwrap();

        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[0], Rating::new("user1", "item_a", 5.0));
        assert_eq!(ratings[1].rating, 3.0);
        assert_eq!(ratings[2].user_id, "user2");
    }

    #[test]
    fn test_parse_ratings_field_count() {
        let err = parse_ratings_str("user1::item_a", "ratings.dat").unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::FieldCountMismatch { found: 2, line: 1, .. }
        ));
    }

    #[test]
    fn test_parse_ratings_invalid_rating() {
        let content = "user1::item_a::5.0\nuser1::item_b::lots";
        let err = parse_ratings_str(content, "ratings.dat").unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, reason } => {
                assert_eq!(file, "ratings.dat");
                assert_eq!(line, 2);
                assert!(reason.contains("Invalid rating"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_ratings_missing_user() {
        let err = parse_ratings_str("::item_a::4.0", "ratings.dat").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_json_str() {
        let ratings = parse_json_str(r#"{"user1": {"item_a": 5.0, "item_b": 3}}"#).unwrap();
        assert_eq!(
            ratings,
            vec![
                Rating::new("user1", "item_a", 5.0),
                Rating::new("user1", "item_b", 3.0),
            ]
        );
    }

    #[test]
    fn test_parse_json_duplicate_rating() {
        let ratings = parse_json_str(r#"{"user1": {"item_a": 5.0, "item_a": 1.0}}"#).unwrap();
        assert_eq!(ratings.len(), 2);

        let err = crate::RatingTable::from_ratings(ratings).unwrap_err();
        match err {
            DataLoadError::DuplicateRating { user_id, item_id } => {
                assert_eq!(user_id, "user1");
                assert_eq!(item_id, "item_a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_json_repeated_user_merges_items() {
        let ratings =
            parse_json_str(r#"{"user1": {"item_a": 5.0}, "user1": {"item_b": 2.0}}"#).unwrap();
        let table = crate::RatingTable::from_ratings(ratings).unwrap();
        assert_eq!(table.counts(), (1, 2, 2));
    }

    #[test]
    fn test_parse_json_empty_ids() {
        let err = parse_json_str(r#"{"": {"item_a": 5.0}}"#).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "userId"));

        let err = parse_json_str(r#"{"user1": {" ": 5.0}}"#).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { ref field, .. } if field == "itemId"));
    }

    #[test]
    fn test_parse_json_invalid() {
        let err = parse_json_str(r#"{"user1": ["item_a"]}"#).unwrap_err();
        assert!(matches!(err, DataLoadError::JsonError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_ratings(Path::new("/definitely/not/here.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
