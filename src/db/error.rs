//! Database-specific error types
//!
//! This module defines all error types that can occur during tag store operations.
//!
//! # Error Types
//!
//! - **`Sqlite`**: Errors from the underlying SQLite store (the "store failure" case)
//! - **`FileNotFound`**: A file ID that has no row in `files`
//! - **`NoPreviousValue`**: The `!` shortcut found nothing to copy
//! - **`InvalidInput`**: Caller supplied an empty or otherwise unusable argument
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents an SQLite error (connection, statement, constraint)
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No file row with the given ID
    #[error("File not found: {0}")]
    FileNotFound(i64),

    /// No other file carries a value for this category yet
    #[error("No previous tag found for category: {0}")]
    NoPreviousValue(String),

    /// Invalid input provided (e.g., empty category)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DbError {
    /// True when the error is an SQLite constraint violation (unique or foreign key)
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
