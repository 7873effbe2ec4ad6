use thiserror::Error;

use crate::db::DbError;
use crate::filters::FilterError;

/// Errors from resolving a selection
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Store failure while evaluating the selection
    #[error(transparent)]
    Store(#[from] DbError),

    /// The selection input could not be parsed
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl From<rusqlite::Error> for SelectionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(err))
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
