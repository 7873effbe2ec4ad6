//! Tag and untag commands

use crate::db::{COPY_PREVIOUS_MARKER, Database, FileId};
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Execute the tag command - attach `category:value` to one file
///
/// # Errors
/// Returns an error if the file does not exist, `!` has nothing to copy,
/// or the database operation fails
pub fn execute(db: &Database, id: FileId, category: &str, value: &str, quiet: bool) -> Result<()> {
    let applied = db.tag_file(id, category, value)?;
    if !quiet {
        if value.trim() == COPY_PREVIOUS_MARKER {
            println!("Tagged #{id} with {}:{applied} (copied)", category.trim());
        } else {
            println!("Tagged #{id} with {}:{applied}", category.trim());
        }
    }
    Ok(())
}

/// Execute the untag command - detach `category:value` from one file
///
/// # Errors
/// Returns an error if the database operation fails
pub fn untag(db: &Database, id: FileId, category: &str, value: &str, quiet: bool) -> Result<()> {
    let removed = db.untag_file(id, category, value)?;
    if !quiet {
        if removed {
            println!("Removed {category}:{value} from #{id}");
        } else {
            println!("#{id} was not tagged {category}:{value}");
        }
    }
    Ok(())
}
