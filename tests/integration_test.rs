//! Integration tests for tagliatelle
//!
//! These tests drive the public API end to end against temporary databases:
//! tagging, filter paths with aliases, previews, paging and bulk mutations.

use tagliatelle::{
    bulk::{BulkError, BulkOperation, apply, run_bulk},
    db::{Database, FileId},
    filters::{FilterError, FilterPath},
    pagination::{PageRequest, paginate},
    schema::{AliasGroup, AliasStore, AliasTable},
    selection::{BulkSelection, SelectionError, select_files},
};
use tempfile::TempDir;

/// Open a file-backed database in a fresh temporary directory
fn setup_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("catalogue.db")).unwrap();
    (db, dir)
}

fn add_file(db: &Database, name: &str, tags: &[(&str, &str)]) -> FileId {
    let id = db.insert_file(name, &format!("uploads/{name}"), "").unwrap();
    for (category, value) in tags {
        db.tag_file(id, category, value).unwrap();
    }
    id
}

fn ids(files: &[tagliatelle::db::File]) -> Vec<FileId> {
    files.iter().map(|f| f.id).collect()
}

#[test]
fn test_filter_with_aliases_and_conjunction() {
    let (db, _dir) = setup_test_db();
    let aliases = AliasTable::new(vec![AliasGroup::new("color", ["red", "crimson", "scarlet"])]);

    let a = add_file(&db, "a.jpg", &[("color", "crimson"), ("size", "large")]);
    let b = add_file(&db, "b.jpg", &[("color", "red"), ("size", "small")]);
    let c = add_file(&db, "c.jpg", &[("color", "scarlet"), ("size", "large")]);
    add_file(&db, "d.jpg", &[("color", "blue"), ("size", "large")]);

    let filter = FilterPath::parse("/tag/color/red", &aliases).unwrap();
    let page = select_files(&db, &filter.criteria, PageRequest::new(1, 10)).unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(ids(&page.files), vec![c, b, a]);

    let filter = FilterPath::parse("/tag/color/red/and/tag/size/large", &aliases).unwrap();
    let page = select_files(&db, &filter.criteria, PageRequest::new(1, 10)).unwrap();
    assert_eq!(ids(&page.files), vec![c, a]);
    assert_eq!(filter.title(), "Tagged: color: red, size: large");
}

#[test]
fn test_unassigned_filter() {
    let (db, _dir) = setup_test_db();
    let tagged = add_file(&db, "a.jpg", &[("color", "red")]);
    let bare = add_file(&db, "b.jpg", &[("size", "large")]);

    let filter = FilterPath::parse("/tag/color/unassigned", &AliasTable::empty()).unwrap();
    let page = select_files(&db, &filter.criteria, PageRequest::new(1, 10)).unwrap();
    assert_eq!(ids(&page.files), vec![bare]);
    assert!(!ids(&page.files).contains(&tagged));
}

#[test]
fn test_preview_one_sample_per_value() {
    let (db, _dir) = setup_test_db();
    add_file(&db, "old-red.jpg", &[("color", "red")]);
    let new_red = add_file(&db, "new-red.jpg", &[("color", "red")]);
    let blue = add_file(&db, "blue.jpg", &[("color", "blue")]);
    add_file(&db, "plain.jpg", &[("size", "large")]);

    let filter = FilterPath::parse("/tag/color/previews", &AliasTable::empty()).unwrap();
    assert!(filter.has_preview());

    let page = select_files(&db, &filter.criteria, PageRequest::new(5, 1)).unwrap();
    assert_eq!(ids(&page.files), vec![blue, new_red]);
    assert_eq!(page.total, 2);
}

#[test]
fn test_paging_through_results() {
    let (db, _dir) = setup_test_db();
    let all: Vec<FileId> = (0..7)
        .map(|i| add_file(&db, &format!("{i}.jpg"), &[("kind", "photo")]))
        .collect();

    let filter = FilterPath::parse("/tag/kind/photo", &AliasTable::empty()).unwrap();
    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = select_files(&db, &filter.criteria, PageRequest::new(page, 3)).unwrap();
        assert_eq!(result.total, 7);
        seen.extend(ids(&result.files));
    }
    let mut expected = all.clone();
    expected.reverse();
    assert_eq!(seen, expected);

    let nav = paginate(3, 7, 3);
    assert_eq!(nav.total_pages, 3);
    assert!(!nav.has_next);
}

#[test]
fn test_malformed_filter_path() {
    let err = FilterPath::parse("/tag/color/red/and/tag/size", &AliasTable::empty()).unwrap_err();
    assert!(matches!(err, FilterError::MalformedFilterPath(_)));
}

#[test]
fn test_hostile_values_are_data() {
    let (db, _dir) = setup_test_db();
    let id = add_file(&db, "a.jpg", &[("color", "red' OR '1'='1")]);
    add_file(&db, "b.jpg", &[("color", "blue")]);

    let filter = FilterPath::parse("/tag/color/red' OR '1'='1", &AliasTable::empty()).unwrap();
    let page = select_files(&db, &filter.criteria, PageRequest::new(1, 10)).unwrap();
    assert_eq!(ids(&page.files), vec![id]);
}

#[test]
fn test_bulk_by_range_skips_missing() {
    let (db, _dir) = setup_test_db();
    let a = add_file(&db, "a.jpg", &[]);
    let b = add_file(&db, "b.jpg", &[]);

    let selection = BulkSelection::Range(format!("{a}-{b},500"));
    let report = run_bulk(&db, &selection, "mood", "calm", BulkOperation::Add).unwrap();

    assert_eq!(report.applied, vec![a, b]);
    assert_eq!(report.missing, vec![500]);
    assert_eq!(report.outcome.files_changed, 2);
    assert!(db.get_file(a).unwrap().unwrap().has_tag("mood", "calm"));
}

#[test]
fn test_bulk_by_or_query() {
    let (db, _dir) = setup_test_db();
    let red = add_file(&db, "a.jpg", &[("color", "red")]);
    let blue = add_file(&db, "b.jpg", &[("color", "blue")]);
    let green = add_file(&db, "c.jpg", &[("color", "green")]);

    let selection = BulkSelection::Query("color:red OR color:blue".into());
    let report = run_bulk(&db, &selection, "palette", "primary", BulkOperation::Add).unwrap();
    assert_eq!(report.applied, vec![red, blue]);
    assert!(!db.get_file(green).unwrap().unwrap().has_tag("palette", "primary"));

    let selection = BulkSelection::Query("palette:primary".into());
    run_bulk(&db, &selection, "palette", "", BulkOperation::Remove).unwrap();
    assert!(db.get_file(red).unwrap().unwrap().tags.get("palette").is_none());
}

#[test]
fn test_bulk_is_all_or_nothing() {
    let (db, _dir) = setup_test_db();
    let a = add_file(&db, "a.jpg", &[]);

    let err = apply(&db, &[a, 9_999], "mood", "calm", BulkOperation::Add).unwrap_err();
    assert!(matches!(err, BulkError::Store(_)));
    assert!(db.get_file(a).unwrap().unwrap().tags.is_empty());
    assert!(db.list_categories().unwrap().is_empty());
}

#[test]
fn test_bulk_invalid_selection() {
    let (db, _dir) = setup_test_db();
    let err = run_bulk(&db, &BulkSelection::Range("3-x".into()), "mood", "calm", BulkOperation::Add)
        .unwrap_err();
    assert!(matches!(
        err,
        BulkError::Selection(SelectionError::Filter(FilterError::InvalidRange(_)))
    ));
}

#[test]
fn test_copy_previous_value() {
    let (db, _dir) = setup_test_db();
    let a = add_file(&db, "a.jpg", &[("photographer", "Ada")]);
    let b = add_file(&db, "b.jpg", &[]);

    let applied = db.tag_file(b, "photographer", "!").unwrap();
    assert_eq!(applied, "Ada");
    assert!(db.get_file(b).unwrap().unwrap().has_tag("photographer", "Ada"));
    assert!(db.get_file(a).unwrap().unwrap().has_tag("photographer", "Ada"));
}

#[test]
fn test_alias_store_swap_affects_new_parses() {
    let (db, _dir) = setup_test_db();
    let crimson = add_file(&db, "a.jpg", &[("color", "crimson")]);
    let store = AliasStore::new(Vec::new());

    let before = FilterPath::parse("/tag/color/red", &store.snapshot()).unwrap();
    assert!(select_files(&db, &before.criteria, PageRequest::new(1, 10)).unwrap().files.is_empty());

    store.replace(vec![AliasGroup::new("color", ["red", "crimson"])]);
    let after = FilterPath::parse("/tag/color/red", &store.snapshot()).unwrap();
    let page = select_files(&db, &after.criteria, PageRequest::new(1, 10)).unwrap();
    assert_eq!(ids(&page.files), vec![crimson]);
}

#[test]
fn test_reopen_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalogue.db");
    let id = {
        let db = Database::open(&path).unwrap();
        add_file(&db, "a.jpg", &[("color", "red")])
    };

    let db = Database::open(&path).unwrap();
    let file = db.get_file(id).unwrap().unwrap();
    assert!(file.has_tag("color", "red"));
    assert_eq!(file.path, "uploads/a.jpg");
}
