//! Tag store for tagliatelle
//!
//! Provides a clean API over the relational representation of files,
//! categories, tags and file↔tag membership, using SQLite (via `rusqlite`)
//! as the embedded backend.
//!
//! Tables:
//! - `files`: one row per catalogued file
//! - `categories`: unique category names
//! - `tags`: `(category_id, value)` pairs, unique
//! - `file_tags`: membership, `(file_id, tag_id)` unique, cascades on delete

use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub mod error;
pub mod tags;
pub mod types;

pub use error::DbError;
pub use types::{File, FileId, TagCount};

/// Maximum description length kept by `set_description`
pub const MAX_DESCRIPTION_LEN: usize = 2048;

/// Tag value that means "reuse the last value assigned in this category"
pub const COPY_PREVIOUS_MARKER: &str = "!";

/// How long a writer waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound-parameter chunk size for `IN (...)` lookups
pub(crate) const MAX_BOUND_IDS: usize = 500;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        filename TEXT NOT NULL,
        path TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        value TEXT NOT NULL,
        UNIQUE(category_id, value)
    );
    CREATE TABLE IF NOT EXISTS file_tags (
        file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        UNIQUE(file_id, tag_id)
    );
    CREATE INDEX IF NOT EXISTS idx_file_tags_tag ON file_tags(tag_id);
";

/// Database wrapper that encapsulates all tag store operations
///
/// Each wrapper owns one SQLite connection. Open one per logical request
/// or thread; the connection itself is not shared.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// Parent directories are created as needed and the schema is applied.
    ///
    /// # Examples
    /// ```no_run
    /// use tagliatelle::db::Database;
    /// let db = Database::open("catalogue.db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the directory cannot be created, the database cannot
    /// be opened, or the schema cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let db = Self::configure(conn)?;
        info!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Opens a private in-memory database (used by tests and dry runs)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self, DbError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection for query primitives
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    // File rows

    /// Register a file row and return its new ID
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for an empty filename, or `DbError` on store failure.
    pub fn insert_file(&self, filename: &str, path: &str, description: &str) -> Result<FileId, DbError> {
        if filename.trim().is_empty() {
            return Err(DbError::InvalidInput("filename cannot be empty".into()));
        }
        self.conn.execute(
            "INSERT INTO files(filename, path, description) VALUES (?1, ?2, ?3)",
            params![filename, path, description],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, filename, "File registered");
        Ok(id)
    }

    /// Get a file with its tag map
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn get_file(&self, id: FileId) -> Result<Option<File>, DbError> {
        let file = self
            .conn
            .query_row(
                "SELECT id, filename, path, COALESCE(description, '') FROM files WHERE id = ?1",
                params![id],
                file_from_row,
            )
            .optional()?;
        match file {
            Some(mut file) => {
                file.tags = self.file_tags(id)?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Check whether a file row exists
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn contains_file(&self, id: FileId) -> Result<bool, DbError> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM files WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Rename a file row (the physical move is the caller's concern)
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileNotFound` if the file does not exist.
    pub fn rename_file(&self, id: FileId, filename: &str, path: &str) -> Result<(), DbError> {
        if filename.trim().is_empty() {
            return Err(DbError::InvalidInput("filename cannot be empty".into()));
        }
        let changed = self.conn.execute(
            "UPDATE files SET filename = ?1, path = ?2 WHERE id = ?3",
            params![filename, path, id],
        )?;
        if changed == 0 {
            return Err(DbError::FileNotFound(id));
        }
        Ok(())
    }

    /// Replace a file's description, truncated to `MAX_DESCRIPTION_LEN` characters
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileNotFound` if the file does not exist.
    pub fn set_description(&self, id: FileId, description: &str) -> Result<(), DbError> {
        let truncated: String = description.chars().take(MAX_DESCRIPTION_LEN).collect();
        let changed = self.conn.execute(
            "UPDATE files SET description = ?1 WHERE id = ?2",
            params![truncated, id],
        )?;
        if changed == 0 {
            return Err(DbError::FileNotFound(id));
        }
        Ok(())
    }

    /// Remove a file row; memberships go with it
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the delete fails.
    pub fn remove_file(&self, id: FileId) -> Result<bool, DbError> {
        let changed = self.conn.execute("DELETE FROM files WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Number of file rows
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn count_files(&self) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Most recently registered files, newest first, without tags
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn recent_files(&self, limit: usize) -> Result<Vec<File>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, filename, path, COALESCE(description, '') FROM files ORDER BY id DESC LIMIT ?1",
        )?;
        let files = stmt
            .query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], file_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(files)
    }

    // Tag map for display

    /// Category → sorted values for one file
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn file_tags(&self, id: FileId) -> Result<BTreeMap<String, Vec<String>>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, t.value
             FROM file_tags ft
             JOIN tags t ON t.id = ft.tag_id
             JOIN categories c ON c.id = t.category_id
             WHERE ft.file_id = ?1
             ORDER BY c.name, t.value",
        )?;
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let rows = stmt.query_map(params![id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (category, value) = row?;
            map.entry(category).or_default().push(value);
        }
        Ok(map)
    }

    /// Load files by ID with their tag maps, preserving the order of `ids`
    ///
    /// IDs without a row are silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any query fails.
    pub fn files_with_tags(&self, ids: &[FileId]) -> Result<Vec<File>, DbError> {
        let mut by_id: HashMap<FileId, File> = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_BOUND_IDS) {
            let placeholders = placeholders(chunk.len());

            let sql = format!(
                "SELECT id, filename, path, COALESCE(description, '') FROM files WHERE id IN ({placeholders})"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            for file in stmt.query_map(params_from_iter(chunk.iter()), file_from_row)? {
                let file = file?;
                by_id.insert(file.id, file);
            }

            let sql = format!(
                "SELECT ft.file_id, c.name, t.value
                 FROM file_tags ft
                 JOIN tags t ON t.id = ft.tag_id
                 JOIN categories c ON c.id = t.category_id
                 WHERE ft.file_id IN ({placeholders})
                 ORDER BY c.name, t.value"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok((
                    row.get::<_, FileId>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for row in rows {
                let (file_id, category, value) = row?;
                if let Some(file) = by_id.get_mut(&file_id) {
                    file.tags.entry(category).or_default().push(value);
                }
            }
        }

        let mut seen = std::collections::HashSet::with_capacity(ids.len());
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| by_id.remove(id))
            .collect())
    }

    // Categories and tags

    /// All category names, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn list_categories(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare("SELECT name FROM categories ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Distinct values of a category that have at least one membership, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn values_in_use(&self, category: &str) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT t.value
             FROM tags t
             JOIN categories c ON c.id = t.category_id
             JOIN file_tags ft ON ft.tag_id = t.id
             WHERE c.name = ?1
             ORDER BY t.value",
        )?;
        let values = stmt
            .query_map(params![category], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(values)
    }

    /// Every tag with at least one membership and its usage count
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn tag_counts(&self) -> Result<Vec<TagCount>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, t.value, COUNT(ft.file_id)
             FROM tags t
             JOIN categories c ON c.id = t.category_id
             LEFT JOIN file_tags ft ON ft.tag_id = t.id
             GROUP BY t.id
             HAVING COUNT(ft.file_id) > 0
             ORDER BY c.name, t.value",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(TagCount {
                    category: row.get(0)?,
                    value: row.get(1)?,
                    count: usize::try_from(row.get::<_, i64>(2)?).unwrap_or(0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    /// Most recently assigned value of `category` on any file other than `exclude`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn previous_tag_value(&self, category: &str, exclude: FileId) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT t.value
                 FROM file_tags ft
                 JOIN tags t ON t.id = ft.tag_id
                 JOIN categories c ON c.id = t.category_id
                 WHERE c.name = ?1 AND ft.file_id != ?2
                 ORDER BY ft.rowid DESC
                 LIMIT 1",
                params![category, exclude],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Attach `category:value` to one file, creating the category and tag if needed
    ///
    /// A value of `!` copies the most recently assigned value of the category
    /// from another file. Returns the value actually applied.
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileNotFound`, `DbError::NoPreviousValue`,
    /// `DbError::InvalidInput` for empty arguments, or a store failure.
    pub fn tag_file(&self, id: FileId, category: &str, value: &str) -> Result<String, DbError> {
        let category = category.trim();
        let value = value.trim();
        if category.is_empty() || value.is_empty() {
            return Err(DbError::InvalidInput("category and value are required".into()));
        }
        if !self.contains_file(id)? {
            return Err(DbError::FileNotFound(id));
        }

        let value = if value == COPY_PREVIOUS_MARKER {
            self.previous_tag_value(category, id)?
                .ok_or_else(|| DbError::NoPreviousValue(category.to_string()))?
        } else {
            value.to_string()
        };

        let tx = self.conn.unchecked_transaction()?;
        let category_id = tags::ensure_category(&tx, category)?;
        let tag_id = tags::ensure_tag(&tx, category_id, &value)?;
        tags::insert_membership(&tx, id, tag_id)?;
        tx.commit()?;

        debug!(id, category, value = %value, "File tagged");
        Ok(value)
    }

    /// Detach `category:value` from one file
    ///
    /// Returns `true` if a membership was removed; an unknown tag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store fails.
    pub fn untag_file(&self, id: FileId, category: &str, value: &str) -> Result<bool, DbError> {
        match tags::find_tag_by_name(&self.conn, category.trim(), value.trim())? {
            Some(tag_id) => Ok(tags::delete_membership(&self.conn, id, tag_id)? > 0),
            None => Ok(false),
        }
    }

    /// Delete every row from every table
    ///
    /// # Warning
    /// This operation is irreversible!
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any delete fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "DELETE FROM file_tags; DELETE FROM tags; DELETE FROM categories; DELETE FROM files;",
        )?;
        Ok(())
    }
}

/// Map a `(id, filename, path, description)` row to a `File` without tags
pub(crate) fn file_from_row(row: &Row<'_>) -> rusqlite::Result<File> {
    Ok(File {
        id: row.get(0)?,
        filename: row.get(1)?,
        path: row.get(2)?,
        description: row.get(3)?,
        tags: BTreeMap::new(),
    })
}

/// `?,?,?` with `n` placeholders
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
