//! Testing utilities for tagliatelle
//!
//! This module provides helper types for writing tests, including a `TestDb`
//! wrapper that owns a temporary on-disk database and a few seeding helpers.
//!
//! Only available when compiled with `cfg(test)`.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::db::{Database, FileId};

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory, so parallel tests
/// never collide and nothing is left behind.
pub struct TestDb {
    // Field order matters: the connection must close before the directory goes
    db: Database,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    /// Create a new, empty test database
    ///
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("tagliatelle.db");
        let db = Database::open(&path).expect("Failed to open test database");
        Self { db, path, _dir: dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the path to the test database
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a second, independent connection to the same database file
    ///
    /// # Panics
    /// Panics if the database cannot be reopened.
    #[must_use]
    pub fn reopen(&self) -> Database {
        Database::open(&self.path).expect("Failed to reopen test database")
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a file named `name` and attach every `category:value` pair
///
/// # Panics
/// Panics on any store error.
pub fn seed_file(db: &Database, name: &str, tags: &[(&str, &str)]) -> FileId {
    let id = db
        .insert_file(name, &format!("uploads/{name}"), "")
        .expect("Failed to insert file");
    for (category, value) in tags {
        db.tag_file(id, category, value).expect("Failed to tag file");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_basic() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count_files().unwrap(), 0);
        assert!(test_db.path().exists());
    }

    #[test]
    fn test_db_cleanup() {
        let path = {
            let test_db = TestDb::new();
            test_db.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_seed_file_and_reopen() {
        let test_db = TestDb::new();
        let id = seed_file(test_db.db(), "a.jpg", &[("color", "red"), ("size", "large")]);

        let other = test_db.reopen();
        let file = other.get_file(id).unwrap().unwrap();
        assert_eq!(file.path, "uploads/a.jpg");
        assert!(file.has_tag("color", "red"));
        assert!(file.has_tag("size", "large"));
    }
}
