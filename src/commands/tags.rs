//! Tag overview and category listing

use colored::Colorize;
use std::collections::BTreeMap;

use crate::db::{Database, TagCount};
use crate::output;
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Execute the tags command - every tag in use, grouped by category
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &Database, quiet: bool) -> Result<()> {
    let counts = db.tag_counts()?;
    if counts.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }

    for (category, tags) in group_by_category(&counts) {
        if !quiet {
            println!("{}", category.bold());
        }
        for tag in tags {
            println!("{}", output::tag_with_count(tag, quiet));
        }
    }
    Ok(())
}

/// Execute the categories command
///
/// # Errors
/// Returns an error if database operations fail
pub fn categories(db: &Database, quiet: bool) -> Result<()> {
    let names = db.list_categories()?;
    if names.is_empty() && !quiet {
        println!("No categories found in database.");
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn group_by_category(counts: &[TagCount]) -> BTreeMap<&str, Vec<&TagCount>> {
    let mut grouped: BTreeMap<&str, Vec<&TagCount>> = BTreeMap::new();
    for tag in counts {
        grouped.entry(tag.category.as_str()).or_default().push(tag);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed_file;

    #[test]
    fn test_group_by_category() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red"), ("size", "large")]);
        seed_file(&db, "b", &[("color", "red"), ("color", "blue")]);

        let counts = db.tag_counts().unwrap();
        let grouped = group_by_category(&counts);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec!["color", "size"]);

        let colors: Vec<_> = grouped["color"].iter().map(|t| (t.value.as_str(), t.count)).collect();
        assert_eq!(colors, vec![("blue", 1), ("red", 2)]);
    }

    #[test]
    fn test_execute_on_empty_db() {
        let db = Database::open_in_memory().unwrap();
        execute(&db, true).unwrap();
        categories(&db, true).unwrap();
    }
}
