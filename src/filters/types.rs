//! Parsed filter structures
//!
//! - `FilterCriterion`: one `category/value` constraint from a filter path
//! - `TagPair`: one `category:value` term from a bulk tag query
//! - `TagQuery`: the pairs plus how to combine them

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a filter criterion constrains its category
///
/// Decided once at parse time; downstream code matches on it instead of
/// re-inspecting the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// File carries any of these values (the alias expansion, seed first)
    ValueMatch(Vec<String>),
    /// File carries no tag in the category
    Unassigned,
    /// Group results by the category's values, one sample file each
    Preview,
}

/// One constraint from a filter path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub category: String,
    /// Value as the user typed it, kept for display
    pub requested: String,
    pub kind: FilterKind,
}

impl FilterCriterion {
    #[must_use]
    pub const fn is_preview(&self) -> bool {
        matches!(self.kind, FilterKind::Preview)
    }

    /// Values the criterion matches; empty for `Unassigned` and `Preview`
    #[must_use]
    pub fn values(&self) -> &[String] {
        match &self.kind {
            FilterKind::ValueMatch(values) => values,
            FilterKind::Unassigned | FilterKind::Preview => &[],
        }
    }
}

/// A literal `category:value` term (no alias expansion)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagPair {
    pub category: String,
    pub value: String,
}

impl TagPair {
    #[must_use]
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for TagPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.value)
    }
}

/// How the pairs of a tag query combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueryMode {
    /// File must carry every pair
    #[default]
    All,
    /// File must carry at least one pair
    Any,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// A parsed bulk tag query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    pub mode: QueryMode,
    pub pairs: Vec<TagPair>,
}
