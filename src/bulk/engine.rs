use rusqlite::{Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use super::core::{BulkOperation, BulkOutcome, BulkReport};
use super::error::BulkError;
use crate::db::{Database, FileId, tags};
use crate::selection::{BulkSelection, Validation, validate_file_ids};

type Result<T> = std::result::Result<T, BulkError>;

/// Add or remove `category:value` on many files atomically
///
/// Category and value are trimmed. For `remove`, an empty value removes every
/// tag of the category from each file. An empty `file_ids` list returns a
/// zero outcome after the category and tag are resolved, so a `remove` of
/// something unknown still fails; nothing is written.
///
/// Runs in one `IMMEDIATE` transaction: either every membership change
/// commits or none does.
///
/// # Errors
/// - `BulkError::EmptyCategory` / `BulkError::EmptyValue` for missing input
/// - `BulkError::UnknownCategory` / `BulkError::UnknownTag` when removing
///   something that was never created
/// - `BulkError::Store` on any store failure, including a file ID with no row
pub fn apply(
    db: &Database,
    file_ids: &[FileId],
    category: &str,
    value: &str,
    operation: BulkOperation,
) -> Result<BulkOutcome> {
    let category = category.trim();
    let value = value.trim();
    if category.is_empty() {
        return Err(BulkError::EmptyCategory);
    }
    if operation == BulkOperation::Add && value.is_empty() {
        return Err(BulkError::EmptyValue);
    }
    let tx = Transaction::new_unchecked(db.connection(), TransactionBehavior::Immediate)?;

    let category_id = match operation {
        BulkOperation::Add => tags::ensure_category(&tx, category)?,
        BulkOperation::Remove => tags::find_category(&tx, category)?
            .ok_or_else(|| BulkError::UnknownCategory(category.to_string()))?,
    };

    let tag_id = if value.is_empty() {
        None
    } else {
        Some(match operation {
            BulkOperation::Add => tags::ensure_tag(&tx, category_id, value)?,
            BulkOperation::Remove => {
                tags::find_tag(&tx, category_id, value)?.ok_or_else(|| BulkError::UnknownTag {
                    category: category.to_string(),
                    value: value.to_string(),
                })?
            }
        })
    };

    // Nothing to change: drop the transaction so upserts roll back
    if file_ids.is_empty() {
        return Ok(BulkOutcome::empty(category, value, operation));
    }

    let mut outcome = BulkOutcome::empty(category, value, operation);
    for &file_id in file_ids {
        let rows = match (operation, tag_id) {
            (BulkOperation::Add, Some(tag_id)) => tags::insert_membership(&tx, file_id, tag_id)?,
            (BulkOperation::Remove, Some(tag_id)) => tags::delete_membership(&tx, file_id, tag_id)?,
            (BulkOperation::Remove, None) => tags::delete_category_memberships(&tx, file_id, category_id)?,
            (BulkOperation::Add, None) => return Err(BulkError::EmptyValue),
        };
        if rows > 0 {
            outcome.files_changed += 1;
            outcome.rows_affected += rows;
        }
    }

    tx.commit()?;
    info!(
        operation = %operation,
        tag = %outcome.tag_label(),
        files = file_ids.len(),
        rows = outcome.rows_affected,
        "Bulk mutation committed"
    );
    Ok(outcome)
}

/// Resolve a selection to the files that exist
///
/// Unknown IDs from a range are reported in [`Validation::missing`]. A tag
/// query that matches nothing is an error rather than a silent no-op.
///
/// # Errors
/// - `BulkError::Selection` if the selection cannot be parsed or evaluated
/// - `BulkError::NoMatches` for a tag query with no matching files
pub fn resolve_targets(db: &Database, selection: &BulkSelection) -> Result<Validation> {
    let ids = selection.resolve(db)?;
    if ids.is_empty()
        && let BulkSelection::Query(query) = selection
    {
        return Err(BulkError::NoMatches(query.clone()));
    }

    let validation = validate_file_ids(db, &ids)?;
    if !validation.missing.is_empty() {
        warn!(count = validation.missing.len(), "Skipping unknown file IDs");
    }
    debug!(
        requested = ids.len(),
        found = validation.found.len(),
        "Bulk selection validated"
    );
    Ok(validation)
}

/// Resolve a selection and apply a mutation to the files that exist
///
/// Unknown IDs from a range are skipped and reported in
/// [`BulkReport::missing`].
///
/// # Errors
/// - any error from [`resolve_targets`]
/// - any error from [`apply`]
pub fn run_bulk(
    db: &Database,
    selection: &BulkSelection,
    category: &str,
    value: &str,
    operation: BulkOperation,
) -> Result<BulkReport> {
    let validation = resolve_targets(db, selection)?;
    let applied = validation.found_ids();
    let outcome = apply(db, &applied, category, value, operation)?;
    Ok(BulkReport {
        applied,
        missing: validation.missing,
        outcome,
    })
}
