//! Bulk mutation errors

use thiserror::Error;

use crate::db::DbError;
use crate::selection::SelectionError;

/// Errors that abort a bulk mutation
///
/// Any error returned from [`apply`](super::apply) means no membership row
/// was changed.
#[derive(Debug, Error)]
pub enum BulkError {
    /// Remove targeted a category that does not exist
    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),

    /// Remove targeted a value that does not exist in the category
    #[error("Tag '{category}:{value}' does not exist")]
    UnknownTag { category: String, value: String },

    /// Operation text is neither `add` nor `remove`
    #[error("Invalid operation '{0}', expected 'add' or 'remove'")]
    InvalidOperation(String),

    /// Category is empty after trimming
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// `add` without a value
    #[error("Value is required when adding a tag")]
    EmptyValue,

    /// A tag query selected no files
    #[error("No files match the query '{0}'")]
    NoMatches(String),

    /// Selection could not be resolved
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Store failure; the transaction was rolled back
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<rusqlite::Error> for BulkError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(err))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
