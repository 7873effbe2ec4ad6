use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use super::{PREVIEW_VALUE, UNASSIGNED_VALUE};

/// A set of interchangeable values within one category
///
/// Aliases only affect filtering; stored tags are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AliasGroup {
    pub category: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl AliasGroup {
    #[must_use]
    pub fn new(category: impl Into<String>, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            category: category.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// True when `value` is one of this group's aliases, ignoring case
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        let folded = fold_case(value);
        self.aliases.iter().any(|a| fold_case(a) == folded)
    }
}

/// Immutable lookup table of alias groups
///
/// Built once from configuration and shared behind an `Arc`. Groups keep
/// their configured order so the first matching group always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
    by_category: HashMap<String, Vec<usize>>,
}

impl AliasTable {
    /// Build a table from configured groups
    ///
    /// Values listed in more than one group of the same category are logged;
    /// lookups still use the first group.
    #[must_use]
    pub fn new(groups: Vec<AliasGroup>) -> Self {
        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            by_category.entry(group.category.clone()).or_default().push(idx);
        }

        let table = Self { groups, by_category };
        table.warn_overlaps();
        table
    }

    /// An empty table (no aliases configured)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn warn_overlaps(&self) {
        for (category, indices) in &self.by_category {
            let mut seen: HashMap<String, usize> = HashMap::new();
            for &idx in indices {
                for alias in &self.groups[idx].aliases {
                    let key = fold_case(alias);
                    match seen.get(&key) {
                        Some(&first) if first != idx => warn!(
                            category = %category,
                            value = %alias,
                            "Alias value appears in more than one group, using the first"
                        ),
                        Some(_) => {}
                        None => {
                            seen.insert(key, idx);
                        }
                    }
                }
            }
        }
    }

    /// Expand a requested value into its alias equivalence class
    ///
    /// The seed always comes first, followed by the other members of the first
    /// group in `category` that contains it, in configured order. Without a
    /// match the result is just the seed. The reserved values `unassigned`
    /// and `previews` are returned unchanged.
    #[must_use]
    pub fn expand(&self, category: &str, value: &str) -> Vec<String> {
        let mut expanded = vec![value.to_string()];
        if value == UNASSIGNED_VALUE || value == PREVIEW_VALUE {
            return expanded;
        }

        if let Some(group) = self.groups_for(category).find(|g| g.contains(value)) {
            let folded = fold_case(value);
            expanded.extend(
                group
                    .aliases
                    .iter()
                    .filter(|a| fold_case(a) != folded)
                    .cloned(),
            );
        }
        expanded
    }

    /// All groups in configured order
    #[must_use]
    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    /// Groups configured for one category, in configured order
    pub fn groups_for<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a AliasGroup> + 'a {
        self.by_category
            .get(category)
            .into_iter()
            .flatten()
            .map(|&idx| &self.groups[idx])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Unicode lowercase form used for every alias comparison
fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
