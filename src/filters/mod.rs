//! Filter parsing
//!
//! Turns user input into typed structures; nothing here touches the store.
//!
//! # Syntax
//!
//! - **Filter paths**: `/tag/<category>/<value>(/and/tag/<category>/<value>)*`.
//!   The value `unassigned` selects files with no tag in the category and
//!   `previews` asks for one sample file per value.
//! - **Tag queries**: `cat:val, cat:val` (all) or `cat:val OR cat:val` (any).
//! - **ID ranges**: `3,5-7,12`.
//!
//! # Examples
//!
//! ```
//! use tagliatelle::filters::{parse_file_id_range, parse_tag_query, QueryMode};
//!
//! assert_eq!(parse_file_id_range("3,5-7,5").unwrap(), vec![3, 5, 6, 7]);
//! let query = parse_tag_query("color:red OR color:blue").unwrap();
//! assert_eq!(query.mode, QueryMode::Any);
//! ```

pub mod error;
pub mod path;
pub mod query;
pub mod range;
pub mod types;

pub use error::FilterError;
pub use path::{Breadcrumb, FilterPath, parse_filter_path};
pub use query::{parse_pair, parse_tag_query};
pub use range::parse_file_id_range;
pub use types::{FilterCriterion, FilterKind, QueryMode, TagPair, TagQuery};
