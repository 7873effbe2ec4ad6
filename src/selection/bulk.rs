//! Bulk selection: which files a bulk mutation targets

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::error::Result;
use super::matching_ids;
use crate::db::{Database, File, FileId};
use crate::filters::{FilterError, QueryMode, parse_file_id_range, parse_tag_query};
use crate::predicate::{Predicate, compile};

/// Target files of a bulk operation, as the user wrote them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkSelection {
    /// Explicit IDs: `3,5-7,12`
    Range(String),
    /// Tag query: `color:red, size:large` or `color:red OR color:blue`
    Query(String),
}

impl BulkSelection {
    /// Resolve to file IDs
    ///
    /// A range resolves to its IDs as parsed, whether or not they exist; use
    /// [`validate_file_ids`] to split out unknown ones. A query resolves to
    /// the matching files in ascending ID order and may be empty.
    ///
    /// # Errors
    /// - `FilterError::EmptyQuery` for a range with no IDs or an empty query
    /// - `FilterError::InvalidRange` / `FilterError::InvalidTagSyntax` on bad input
    /// - `SelectionError::Store` if the query fails
    pub fn resolve(&self, db: &Database) -> Result<Vec<FileId>> {
        match self {
            Self::Range(range) => {
                let ids = parse_file_id_range(range)?;
                if ids.is_empty() {
                    return Err(FilterError::EmptyQuery.into());
                }
                Ok(ids)
            }
            Self::Query(query) => {
                let query = parse_tag_query(query)?;
                let predicate = match query.mode {
                    QueryMode::All => Predicate::all_of(&query.pairs),
                    QueryMode::Any => Predicate::any_of(&query.pairs),
                };
                let ids = matching_ids(db.connection(), &compile(&predicate))?;
                debug!(mode = %query.mode, pairs = query.pairs.len(), matched = ids.len(), "Tag query resolved");
                Ok(ids)
            }
        }
    }

    /// True for the tag-query form
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

/// Outcome of checking IDs against the store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Validation {
    /// Existing files, in request order
    pub found: Vec<File>,
    /// Requested IDs with no file row, in request order
    pub missing: Vec<FileId>,
}

impl Validation {
    #[must_use]
    pub fn found_ids(&self) -> Vec<FileId> {
        self.found.iter().map(|f| f.id).collect()
    }
}

/// Split IDs into existing files and unknown IDs
///
/// # Errors
/// Returns `SelectionError::Store` if a query fails.
pub fn validate_file_ids(db: &Database, ids: &[FileId]) -> Result<Validation> {
    let found = db.files_with_tags(ids)?;
    let present: HashSet<FileId> = found.iter().map(|f| f.id).collect();

    let mut seen = HashSet::new();
    let missing: Vec<FileId> = ids
        .iter()
        .copied()
        .filter(|id| !present.contains(id) && seen.insert(*id))
        .collect();

    if !missing.is_empty() {
        warn!(missing = ?missing, "Requested file IDs not found");
    }
    Ok(Validation { found, missing })
}
