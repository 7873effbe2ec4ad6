//! Alias groups and their resolution
//!
//! An alias group declares values of one category interchangeable for
//! filtering: with `color: [red, crimson]` configured, a filter on
//! `color/crimson` also matches files tagged `color:red`.
//!
//! - [`AliasTable`] is the immutable lookup structure built from configuration
//! - [`AliasStore`] holds the current table and swaps it wholesale on save
//!
//! # Examples
//!
//! ```
//! use tagliatelle::schema::{AliasGroup, AliasTable};
//!
//! let table = AliasTable::new(vec![AliasGroup::new("color", ["red", "crimson"])]);
//! assert_eq!(table.expand("color", "Crimson"), vec!["Crimson", "red"]);
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, SchemaError};
pub use store::AliasStore;
pub use types::{AliasGroup, AliasTable};

use std::path::Path;

/// Filter value selecting files with no tag in the category
pub const UNASSIGNED_VALUE: &str = "unassigned";

/// Filter value requesting one sample file per value of the category
pub const PREVIEW_VALUE: &str = "previews";

/// Parse a JSON alias payload: `[{"category": "...", "aliases": [...]}]`
///
/// Categories and aliases are trimmed and empty aliases dropped. Groups
/// left without any alias are skipped.
///
/// # Errors
/// Returns `SchemaError::Json` for malformed input, or
/// `SchemaError::InvalidGroup` when a group has an empty category.
pub fn parse_alias_groups(json: &str) -> Result<Vec<AliasGroup>> {
    let raw: Vec<AliasGroup> = serde_json::from_str(json)?;
    let mut groups = Vec::with_capacity(raw.len());

    for (idx, group) in raw.into_iter().enumerate() {
        let category = group.category.trim();
        if category.is_empty() {
            return Err(SchemaError::InvalidGroup(format!(
                "group {} has an empty category",
                idx + 1
            )));
        }
        let aliases: Vec<String> = group
            .aliases
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if aliases.is_empty() {
            continue;
        }
        groups.push(AliasGroup {
            category: category.to_string(),
            aliases,
        });
    }

    Ok(groups)
}

/// Read and parse a JSON alias file
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_alias_file(path: &Path) -> Result<Vec<AliasGroup>> {
    let content = std::fs::read_to_string(path)?;
    parse_alias_groups(&content)
}
