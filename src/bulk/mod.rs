//! Bulk mutation engine
//!
//! Adds or removes one tag across many files in a single transaction:
//! - `core`: operation, outcome and report types
//! - `engine`: [`apply`] on explicit IDs and [`run_bulk`] on a selection
//! - `error`: [`BulkError`]
//!
//! # Examples
//!
//! ```
//! use tagliatelle::bulk::{BulkOperation, apply};
//! use tagliatelle::db::Database;
//!
//! let db = Database::open_in_memory().unwrap();
//! let a = db.insert_file("a.jpg", "uploads/a.jpg", "").unwrap();
//! let b = db.insert_file("b.jpg", "uploads/b.jpg", "").unwrap();
//!
//! let outcome = apply(&db, &[a, b], "color", "red", BulkOperation::Add).unwrap();
//! assert_eq!(outcome.rows_affected, 2);
//! ```

mod core;
mod engine;
pub mod error;

pub use self::core::{BulkOperation, BulkOutcome, BulkReport};
pub use engine::{apply, resolve_targets, run_bulk};
pub use error::BulkError;
