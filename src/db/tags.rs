//! Category and tag row primitives
//!
//! These take a plain `&Connection` so they run unchanged inside a
//! `rusqlite::Transaction` (which derefs to `Connection`). Creation is an
//! idempotent upsert: `INSERT ... ON CONFLICT DO NOTHING` followed by a
//! re-select, so two writers racing to create the same row both end up
//! with the same ID instead of a unique-constraint error.

use rusqlite::{Connection, OptionalExtension, params};

/// Look up a category ID by exact (case-sensitive) name
pub fn find_category(conn: &Connection, name: &str) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
}

/// Look up a tag ID under a category
pub fn find_tag(conn: &Connection, category_id: i64, value: &str) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM tags WHERE category_id = ?1 AND value = ?2",
        params![category_id, value],
        |row| row.get(0),
    )
    .optional()
}

/// Look up a tag ID by category name and value
pub fn find_tag_by_name(
    conn: &Connection,
    category: &str,
    value: &str,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT t.id FROM tags t
         JOIN categories c ON c.id = t.category_id
         WHERE c.name = ?1 AND t.value = ?2",
        params![category, value],
        |row| row.get(0),
    )
    .optional()
}

/// Fetch or create a category, returning its ID
pub fn ensure_category(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO categories(name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        params![name],
    )?;
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
}

/// Fetch or create a tag under a category, returning its ID
pub fn ensure_tag(conn: &Connection, category_id: i64, value: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO tags(category_id, value) VALUES (?1, ?2)
         ON CONFLICT(category_id, value) DO NOTHING",
        params![category_id, value],
    )?;
    conn.query_row(
        "SELECT id FROM tags WHERE category_id = ?1 AND value = ?2",
        params![category_id, value],
        |row| row.get(0),
    )
}

/// Insert a membership row; an existing pair is left untouched.
///
/// Returns the number of rows inserted (0 or 1).
pub fn insert_membership(conn: &Connection, file_id: i64, tag_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT OR IGNORE INTO file_tags(file_id, tag_id) VALUES (?1, ?2)",
        params![file_id, tag_id],
    )
}

/// Delete one membership row, returning the number of rows removed
pub fn delete_membership(conn: &Connection, file_id: i64, tag_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM file_tags WHERE file_id = ?1 AND tag_id = ?2",
        params![file_id, tag_id],
    )
}

/// Delete every membership of a file within a category
pub fn delete_category_memberships(
    conn: &Connection,
    file_id: i64,
    category_id: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM file_tags
         WHERE file_id = ?1
           AND tag_id IN (SELECT t.id FROM tags t WHERE t.category_id = ?2)",
        params![file_id, category_id],
    )
}
