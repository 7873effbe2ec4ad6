//! Selection resolution
//!
//! Evaluates parsed filters against the tag store. Everything here is
//! read-only: resolving a selection never creates categories or tags.
//!
//! - **Predicate mode**: files matching every criterion, newest first, paged
//! - **Preview mode**: one sample file per value of a preview category
//! - **Bulk selection**: an ID range or tag query resolved to file IDs

pub mod bulk;
pub mod error;

pub use bulk::{BulkSelection, Validation, validate_file_ids};
pub use error::{Result, SelectionError};

use rusqlite::{Connection, params_from_iter};
use tracing::debug;

use crate::db::{Database, File, FileId};
use crate::filters::FilterCriterion;
use crate::pagination::PageRequest;
use crate::predicate::{Clause, CompiledPredicate, Predicate, SqlParam, compile};

/// One page of a selection plus the total match count
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionPage {
    pub files: Vec<File>,
    pub total: usize,
}

/// Resolve path-filter criteria to a page of files
///
/// When any criterion is a preview, the result is the preview listing and
/// `page` is ignored.
///
/// # Errors
/// Returns `SelectionError::Store` if a query fails.
pub fn select_files(db: &Database, criteria: &[FilterCriterion], page: PageRequest) -> Result<SelectionPage> {
    if criteria.iter().any(FilterCriterion::is_preview) {
        let files = preview_files(db, criteria)?;
        let total = files.len();
        return Ok(SelectionPage { files, total });
    }

    let compiled = compile(&Predicate::from_criteria(criteria));
    let total = count_matching(db.connection(), &compiled)?;
    let ids = page_ids(db.connection(), &compiled, page)?;
    debug!(criteria = criteria.len(), total, returned = ids.len(), "Selection resolved");

    Ok(SelectionPage {
        files: db.files_with_tags(&ids)?,
        total,
    })
}

/// Number of files matching the criteria (preview criteria are ignored)
///
/// # Errors
/// Returns `SelectionError::Store` if the query fails.
pub fn count(db: &Database, criteria: &[FilterCriterion]) -> Result<usize> {
    let compiled = compile(&Predicate::from_criteria(criteria));
    count_matching(db.connection(), &compiled)
}

/// One newest sample file per value of the first preview category
///
/// Values come from tags in that category with at least one membership,
/// sorted. Each sample must also satisfy every other criterion, and every
/// preview criterion is pinned to the value being sampled, so
/// `color/previews` with `artist/previews` needs `artist` tagged with the
/// same value as `color`. Values with no qualifying file are left out.
///
/// # Errors
/// Returns `SelectionError::Store` if a query fails.
pub fn preview_files(db: &Database, criteria: &[FilterCriterion]) -> Result<Vec<File>> {
    let Some(first_preview) = criteria.iter().find(|c| c.is_preview()) else {
        return Ok(Vec::new());
    };
    let preview_category = &first_preview.category;

    let values = db.values_in_use(preview_category)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let base = Predicate::from_criteria(criteria);
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        let predicate = criteria
            .iter()
            .filter(|c| c.is_preview())
            .fold(base.clone(), |predicate, c| {
                predicate.with(Clause::Exists {
                    category: c.category.clone(),
                    value: value.clone(),
                })
            });
        let compiled = compile(&predicate);
        if let Some(id) = page_ids(db.connection(), &compiled, PageRequest::new(1, 1))?.first() {
            ids.push(*id);
        }
    }
    debug!(category = %preview_category, samples = ids.len(), "Preview resolved");

    Ok(db.files_with_tags(&ids)?)
}

/// Files with at least one tag, newest first
///
/// # Errors
/// Returns `SelectionError::Store` if a query fails.
pub fn tagged_files(db: &Database, page: PageRequest) -> Result<SelectionPage> {
    listing(db, "EXISTS (SELECT 1 FROM file_tags ft WHERE ft.file_id = f.id)", page)
}

/// Files with no tags at all, newest first
///
/// # Errors
/// Returns `SelectionError::Store` if a query fails.
pub fn untagged_files(db: &Database, page: PageRequest) -> Result<SelectionPage> {
    listing(db, "NOT EXISTS (SELECT 1 FROM file_tags ft WHERE ft.file_id = f.id)", page)
}

fn listing(db: &Database, condition: &'static str, page: PageRequest) -> Result<SelectionPage> {
    let compiled = CompiledPredicate {
        sql: condition.to_string(),
        params: Vec::new(),
    };
    let total = count_matching(db.connection(), &compiled)?;
    let ids = page_ids(db.connection(), &compiled, page)?;
    Ok(SelectionPage {
        files: db.files_with_tags(&ids)?,
        total,
    })
}

fn count_matching(conn: &Connection, compiled: &CompiledPredicate) -> Result<usize> {
    let sql = format!("SELECT COUNT(*) FROM files f WHERE {}", compiled.sql);
    let total: i64 = conn.query_row(&sql, params_from_iter(compiled.params.iter()), |row| row.get(0))?;
    Ok(usize::try_from(total).unwrap_or(0))
}

/// Matching IDs for one page, newest first
fn page_ids(conn: &Connection, compiled: &CompiledPredicate, page: PageRequest) -> Result<Vec<FileId>> {
    let sql = format!(
        "SELECT f.id FROM files f WHERE {} ORDER BY f.id DESC LIMIT ? OFFSET ?",
        compiled.sql
    );
    let params = compiled.params.iter().cloned().chain([
        SqlParam::Int(i64::try_from(page.limit()).unwrap_or(i64::MAX)),
        SqlParam::Int(i64::try_from(page.offset()).unwrap_or(i64::MAX)),
    ]);
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt
        .query_map(params_from_iter(params), |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<FileId>>>()?;
    Ok(ids)
}

/// All matching IDs, ascending
pub(crate) fn matching_ids(conn: &Connection, compiled: &CompiledPredicate) -> Result<Vec<FileId>> {
    let sql = format!("SELECT f.id FROM files f WHERE {} ORDER BY f.id", compiled.sql);
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt
        .query_map(params_from_iter(compiled.params.iter()), |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<FileId>>>()?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::parse_filter_path;
    use crate::schema::{AliasGroup, AliasTable};
    use crate::testing::seed_file;

    fn criteria(path: &str, aliases: &AliasTable) -> Vec<FilterCriterion> {
        parse_filter_path(path, aliases).unwrap()
    }

    fn ids(page: &SelectionPage) -> Vec<FileId> {
        page.files.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_alias_expansion_matches_stored_alias() {
        let db = Database::open_in_memory().unwrap();
        let aliases = AliasTable::new(vec![AliasGroup::new("color", ["red", "crimson"])]);
        let a = seed_file(&db, "a", &[("color", "red")]);
        let b = seed_file(&db, "b", &[("color", "crimson")]);
        seed_file(&db, "c", &[("color", "blue")]);

        let page = select_files(&db, &criteria("/tag/color/crimson", &aliases), PageRequest::new(1, 10)).unwrap();
        assert_eq!(ids(&page), vec![b, a]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_conjunction_and_unassigned() {
        let db = Database::open_in_memory().unwrap();
        let table = AliasTable::empty();
        let a = seed_file(&db, "a", &[("color", "red")]);
        seed_file(&db, "b", &[("color", "red"), ("size", "large")]);
        seed_file(&db, "c", &[("size", "large")]);

        let page = select_files(
            &db,
            &criteria("/tag/color/red/and/tag/size/unassigned", &table),
            PageRequest::new(1, 10),
        )
        .unwrap();
        assert_eq!(ids(&page), vec![a]);
        assert_eq!(count(&db, &criteria("/tag/size/large", &table)).unwrap(), 2);
    }

    #[test]
    fn test_paging_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let all: Vec<_> = (0..5)
            .map(|i| seed_file(&db, &format!("f{i}"), &[("kind", "photo")]))
            .collect();
        let filter = criteria("/tag/kind/photo", &AliasTable::empty());

        let first = select_files(&db, &filter, PageRequest::new(1, 2)).unwrap();
        let third = select_files(&db, &filter, PageRequest::new(3, 2)).unwrap();
        assert_eq!(first.total, 5);
        assert_eq!(ids(&first), vec![all[4], all[3]]);
        assert_eq!(ids(&third), vec![all[0]]);
    }

    #[test]
    fn test_unknown_value_matches_nothing_and_creates_nothing() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red")]);
        let page = select_files(
            &db,
            &criteria("/tag/mood/happy", &AliasTable::empty()),
            PageRequest::new(1, 10),
        )
        .unwrap();
        assert!(page.files.is_empty());
        assert_eq!(db.list_categories().unwrap(), vec!["color"]);
    }

    #[test]
    fn test_preview_one_newest_file_per_value() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red"), ("size", "large")]);
        let b = seed_file(&db, "b", &[("color", "red"), ("size", "large")]);
        let c = seed_file(&db, "c", &[("color", "blue"), ("size", "large")]);
        seed_file(&db, "d", &[("color", "green")]);

        let page = select_files(
            &db,
            &criteria("/tag/size/large/and/tag/color/previews", &AliasTable::empty()),
            PageRequest::new(1, 10),
        )
        .unwrap();
        // blue, green (no large match, skipped), red
        assert_eq!(ids(&page), vec![c, b]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_preview_without_values_is_empty() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red")]);
        let files = preview_files(&db, &criteria("/tag/artist/previews", &AliasTable::empty())).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_every_preview_pinned_to_sampled_value() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red"), ("artist", "monet")]);
        seed_file(&db, "b", &[("color", "red")]);
        let both = seed_file(&db, "c", &[("color", "blue"), ("artist", "blue")]);

        let files = preview_files(
            &db,
            &criteria("/tag/color/previews/and/tag/artist/previews", &AliasTable::empty()),
        )
        .unwrap();
        assert_eq!(files.iter().map(|f| f.id).collect::<Vec<_>>(), vec![both]);
    }

    #[test]
    fn test_tagged_and_untagged_listings() {
        let db = Database::open_in_memory().unwrap();
        let a = seed_file(&db, "a", &[("color", "red")]);
        let b = seed_file(&db, "b", &[]);
        let c = seed_file(&db, "c", &[]);

        let tagged = tagged_files(&db, PageRequest::new(1, 10)).unwrap();
        assert_eq!(ids(&tagged), vec![a]);

        let untagged = untagged_files(&db, PageRequest::new(1, 1)).unwrap();
        assert_eq!(untagged.total, 2);
        assert_eq!(ids(&untagged), vec![c]);
        assert_ne!(b, c);
    }
}
