use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::BulkError;
use crate::db::FileId;

/// Direction of a bulk mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulkOperation {
    Add,
    Remove,
}

impl BulkOperation {
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }

    #[must_use]
    pub const fn preposition(self) -> &'static str {
        match self {
            Self::Add => "to",
            Self::Remove => "from",
        }
    }
}

impl FromStr for BulkOperation {
    type Err = BulkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            _ => Err(BulkError::InvalidOperation(s.to_string())),
        }
    }
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Result of one committed bulk mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub category: String,
    /// Empty for a category-wide remove
    pub value: String,
    pub operation: BulkOperation,
    /// Files whose memberships actually changed
    pub files_changed: usize,
    /// Membership rows inserted or deleted
    pub rows_affected: usize,
}

impl BulkOutcome {
    pub(crate) fn empty(category: &str, value: &str, operation: BulkOperation) -> Self {
        Self {
            category: category.to_string(),
            value: value.to_string(),
            operation,
            files_changed: 0,
            rows_affected: 0,
        }
    }

    /// `category:value`, or `category:*` for a category-wide remove
    #[must_use]
    pub fn tag_label(&self) -> String {
        if self.value.is_empty() {
            format!("{}:*", self.category)
        } else {
            format!("{}:{}", self.category, self.value)
        }
    }
}

/// Everything `run_bulk` did, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    /// IDs the mutation was applied to
    pub applied: Vec<FileId>,
    /// Requested IDs with no file row; skipped
    pub missing: Vec<FileId>,
    pub outcome: BulkOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_str() {
        assert_eq!("add".parse::<BulkOperation>().unwrap(), BulkOperation::Add);
        assert_eq!(" REMOVE ".parse::<BulkOperation>().unwrap(), BulkOperation::Remove);
        assert!(matches!(
            "delete".parse::<BulkOperation>(),
            Err(BulkError::InvalidOperation(op)) if op == "delete"
        ));
    }

    #[test]
    fn test_tag_label() {
        let mut outcome = BulkOutcome::empty("color", "", BulkOperation::Remove);
        assert_eq!(outcome.tag_label(), "color:*");
        outcome.value = "red".into();
        assert_eq!(outcome.tag_label(), "color:red");
    }
}
