//! Error types for the data-loader crate.
//!
//! Covers both loading a ratings file and looking entities up in a
//! [`RatingTable`](crate::RatingTable).

use thiserror::Error;

/// Errors that can occur while loading or querying rating data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON ratings file was malformed
    #[error("Invalid JSON ratings: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: String,
        found: usize,
        line: usize,
    },

    /// The same user rated the same item twice
    #[error("Duplicate rating for user {user_id} and item {item_id}")]
    DuplicateRating { user_id: String, item_id: String },

    /// Referenced entity doesn't exist in the table
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
