//! Row types handed out by the tag store
//!
//! These are plain data carriers for the display side. They hold no
//! connection state and can be cloned or serialized freely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a row in `files`
pub type FileId = i64;

/// A catalogued file together with its resolved tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct File {
    pub id: FileId,
    pub filename: String,
    pub path: String,
    pub description: String,
    /// Category name mapped to its values, values sorted
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}

impl File {
    /// Values of one category, empty when the file has none
    #[must_use]
    pub fn values(&self, category: &str) -> &[String] {
        self.tags.get(category).map_or(&[], Vec::as_slice)
    }

    /// True when the file carries `category:value`
    #[must_use]
    pub fn has_tag(&self, category: &str, value: &str) -> bool {
        self.values(category).iter().any(|v| v == value)
    }

    /// Flatten the tag map into `category:value` strings
    #[must_use]
    pub fn tag_strings(&self) -> Vec<String> {
        self.tags
            .iter()
            .flat_map(|(cat, values)| values.iter().map(move |v| format!("{cat}:{v}")))
            .collect()
    }
}

/// Usage count of a single tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub category: String,
    pub value: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> File {
        let mut tags = BTreeMap::new();
        tags.insert("color".to_string(), vec!["blue".to_string(), "red".to_string()]);
        tags.insert("size".to_string(), vec!["large".to_string()]);
        File {
            id: 7,
            filename: "cat.jpg".into(),
            path: "uploads/cat.jpg".into(),
            description: String::new(),
            tags,
        }
    }

    #[test]
    fn test_values_and_has_tag() {
        let file = sample();
        assert_eq!(file.values("color"), ["blue", "red"]);
        assert!(file.values("mood").is_empty());
        assert!(file.has_tag("size", "large"));
        assert!(!file.has_tag("size", "small"));
    }

    #[test]
    fn test_tag_strings_are_category_ordered() {
        assert_eq!(
            sample().tag_strings(),
            vec!["color:blue", "color:red", "size:large"]
        );
    }
}
