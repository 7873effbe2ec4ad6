//! Filter command: evaluate a tag filter path

use colored::Colorize;

use crate::db::Database;
use crate::filters::FilterPath;
use crate::output;
use crate::pagination::{PageRequest, paginate};
use crate::schema::AliasTable;
use crate::selection::{SelectionPage, select_files};
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Execute the filter command
///
/// Preview paths print one sample file per value and ignore `page`.
///
/// # Errors
/// Returns an error if the path is malformed or the query fails
pub fn execute(
    db: &Database,
    aliases: &AliasTable,
    path: &str,
    page: usize,
    per_page: usize,
    quiet: bool,
) -> Result<()> {
    let (filter, result) = run(db, aliases, path, PageRequest::new(page, per_page))?;

    if !quiet {
        println!("{}", filter.title().bold());
        println!("{}\n", output::breadcrumb_trail(&filter.breadcrumbs()).dimmed());
    }

    if result.files.is_empty() {
        if !quiet {
            println!("No files found.");
        }
        return Ok(());
    }

    for file in &result.files {
        println!("{}", output::file_line(file, quiet));
    }

    if !quiet && !filter.has_preview() {
        let pagination = paginate(page, result.total, per_page);
        println!("\n{}", output::pagination_footer(&pagination, result.total).dimmed());
    }
    Ok(())
}

/// Parse and resolve a filter path
///
/// # Errors
/// Returns an error if the path is malformed or the query fails
pub fn run(
    db: &Database,
    aliases: &AliasTable,
    path: &str,
    page: PageRequest,
) -> Result<(FilterPath, SelectionPage)> {
    let filter = FilterPath::parse(path, aliases)?;
    let result = select_files(db, &filter.criteria, page)?;
    Ok((filter, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterError;
    use crate::schema::AliasGroup;
    use crate::testing::seed_file;

    #[test]
    fn test_run_with_aliases() {
        let db = Database::open_in_memory().unwrap();
        let aliases = AliasTable::new(vec![AliasGroup::new("color", ["red", "crimson"])]);
        let a = seed_file(&db, "a", &[("color", "crimson")]);
        seed_file(&db, "b", &[("color", "blue")]);

        let (filter, result) = run(&db, &aliases, "/tag/color/red", PageRequest::new(1, 10)).unwrap();
        assert_eq!(filter.title(), "Tagged: color: red");
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].id, a);
    }

    #[test]
    fn test_run_malformed_path() {
        let db = Database::open_in_memory().unwrap();
        let err = run(&db, &AliasTable::empty(), "/tag/color", PageRequest::new(1, 10)).unwrap_err();
        assert!(matches!(
            err,
            TagliatelleError::Filter(FilterError::MalformedFilterPath(_))
        ));
    }

    #[test]
    fn test_execute_quiet() {
        let db = Database::open_in_memory().unwrap();
        seed_file(&db, "a", &[("color", "red")]);
        execute(&db, &AliasTable::empty(), "/tag/color/previews", 1, 10, true).unwrap();
    }
}
