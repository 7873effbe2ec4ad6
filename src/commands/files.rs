//! File record commands

use colored::Colorize;
use dialoguer::Confirm;
use std::path::Path;

use crate::cli::FilesCommands;
use crate::db::{Database, FileId};
use crate::output;
use crate::pagination::{PageRequest, paginate};
use crate::selection::{SelectionPage, tagged_files, untagged_files};
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Execute a `files` subcommand
///
/// # Errors
/// Returns an error if input is invalid or a database operation fails
pub fn execute(db: &Database, command: FilesCommands, per_page: usize, quiet: bool) -> Result<()> {
    match command {
        FilesCommands::Add { path, description } => {
            let id = add(db, &path, &description)?;
            if quiet {
                println!("{id}");
            } else {
                println!("Registered {} as #{id}", path.display());
            }
        }
        FilesCommands::Show { id } => {
            let file = db.get_file(id)?.ok_or(crate::db::DbError::FileNotFound(id))?;
            print!("{}", output::file_details(&file));
        }
        FilesCommands::List { page } => {
            let request = PageRequest::new(page, per_page);
            print_page(&tagged_files(db, request)?, request, quiet);
        }
        FilesCommands::Untagged { page } => {
            let request = PageRequest::new(page, per_page);
            print_page(&untagged_files(db, request)?, request, quiet);
        }
        FilesCommands::Rename { id, name } => {
            rename(db, id, &name)?;
            if !quiet {
                println!("Renamed #{id} to {name}");
            }
        }
        FilesCommands::Describe { id, text } => {
            db.set_description(id, &text)?;
            if !quiet {
                println!("Updated description of #{id}");
            }
        }
        FilesCommands::Remove { id, yes } => {
            let file = db.get_file(id)?.ok_or(crate::db::DbError::FileNotFound(id))?;
            if !yes && !confirm_remove(&file.filename)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            db.remove_file(id)?;
            if !quiet {
                println!("Removed #{id} ({})", file.filename);
            }
        }
    }
    Ok(())
}

/// Register a file record; the filename is the last path component
///
/// # Errors
/// Returns `TagliatelleError::InvalidInput` if the path has no filename
pub fn add(db: &Database, path: &Path, description: &str) -> Result<FileId> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            TagliatelleError::InvalidInput(format!("'{}' has no usable filename", path.display()))
        })?;
    let path_str = path.to_string_lossy();
    Ok(db.insert_file(filename, &path_str, description)?)
}

/// Rename a file record, keeping it in the same directory
///
/// # Errors
/// Returns an error if the file does not exist or the name is invalid
pub fn rename(db: &Database, id: FileId, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return Err(TagliatelleError::InvalidInput(format!("invalid filename '{name}'")));
    }
    let file = db.get_file(id)?.ok_or(crate::db::DbError::FileNotFound(id))?;
    let new_path = Path::new(&file.path).with_file_name(name);
    db.rename_file(id, name, &new_path.to_string_lossy())?;
    Ok(())
}

fn print_page(page: &SelectionPage, request: PageRequest, quiet: bool) {
    if page.files.is_empty() && !quiet {
        println!("No files found.");
        return;
    }
    for file in &page.files {
        println!("{}", output::file_line(file, quiet));
    }
    if !quiet {
        let pagination = paginate(request.page, page.total, request.per_page);
        println!("\n{}", output::pagination_footer(&pagination, page.total).dimmed());
    }
}

fn confirm_remove(filename: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Remove {filename} and all its tags?"))
        .default(false)
        .interact()
        .map_err(|e| TagliatelleError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed_file;

    #[test]
    fn test_add_uses_last_component() {
        let db = Database::open_in_memory().unwrap();
        let id = add(&db, Path::new("uploads/2024/cat.jpg"), "a cat").unwrap();
        let file = db.get_file(id).unwrap().unwrap();
        assert_eq!(file.filename, "cat.jpg");
        assert_eq!(file.path, "uploads/2024/cat.jpg");
        assert_eq!(file.description, "a cat");
    }

    #[test]
    fn test_add_rejects_pathless_input() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            add(&db, Path::new(".."), ""),
            Err(TagliatelleError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rename_keeps_directory() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_file(&db, "old.jpg", &[("color", "red")]);
        rename(&db, id, "new.jpg").unwrap();

        let file = db.get_file(id).unwrap().unwrap();
        assert_eq!(file.filename, "new.jpg");
        assert_eq!(file.path, "uploads/new.jpg");
        assert!(file.has_tag("color", "red"));
    }

    #[test]
    fn test_rename_rejects_separators() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_file(&db, "a.jpg", &[]);
        assert!(rename(&db, id, "../b.jpg").is_err());
        assert!(rename(&db, id, "  ").is_err());
    }

    #[test]
    fn test_remove_with_yes_skips_prompt() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_file(&db, "a.jpg", &[("color", "red")]);
        execute(&db, FilesCommands::Remove { id, yes: true }, 10, true).unwrap();
        assert!(db.get_file(id).unwrap().is_none());
    }
}
