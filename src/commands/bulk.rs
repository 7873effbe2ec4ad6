//! Bulk tag command

use colored::Colorize;
use dialoguer::Confirm;

use crate::bulk::{self, BulkError, BulkOperation};
use crate::cli::BulkArgs;
use crate::db::{Database, File};
use crate::output;
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

const PREVIEW_LIMIT: usize = 10;

/// Execute the bulk command
///
/// Resolves the selection once, then previews (`--dry-run`), asks for
/// confirmation unless `--yes`, and applies the change to the files that
/// exist. Unknown IDs in a range are reported but do not abort the run.
///
/// # Errors
/// Returns an error if the arguments are invalid, a tag query matches
/// nothing, or the mutation fails (in which case nothing is written)
pub fn execute(db: &Database, args: &BulkArgs, quiet: bool) -> Result<()> {
    let operation = args.operation()?;
    check_input(&args.category, &args.value, operation)?;

    let selection = args.selection();
    let validation = bulk::resolve_targets(db, &selection)?;
    let label = tag_label(&args.category, &args.value);

    if !validation.missing.is_empty() && !quiet {
        eprintln!(
            "{} Skipping unknown file ID(s): {}",
            "⚠".yellow(),
            join_ids(&validation.missing)
        );
    }

    if validation.found.is_empty() {
        // Still surfaces an unknown category or tag for a remove
        bulk::apply(db, &[], &args.category, &args.value, operation)?;
        if !quiet {
            println!("No existing files selected.");
        }
        return Ok(());
    }

    if args.dry_run {
        print_dry_run_preview(&validation.found, &label, operation);
        return Ok(());
    }

    if !args.yes && !confirm_bulk_operation(validation.found.len(), &label, operation)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let outcome = bulk::apply(db, &validation.found_ids(), &args.category, &args.value, operation)?;
    if quiet {
        println!("{}", outcome.files_changed);
    } else {
        println!("{} {}", "✓".green().bold(), output::bulk_outcome(&outcome));
    }
    Ok(())
}

fn check_input(category: &str, value: &str, operation: BulkOperation) -> Result<()> {
    if category.trim().is_empty() {
        return Err(BulkError::EmptyCategory.into());
    }
    if operation == BulkOperation::Add && value.trim().is_empty() {
        return Err(BulkError::EmptyValue.into());
    }
    Ok(())
}

fn tag_label(category: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        format!("{}:*", category.trim())
    } else {
        format!("{}:{value}", category.trim())
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Print dry-run preview of bulk operation
fn print_dry_run_preview(files: &[File], label: &str, operation: BulkOperation) {
    println!("{}", "=== Dry Run Mode ===".yellow().bold());
    println!(
        "Would {} {} {} {} file(s)",
        operation.verb(),
        label.cyan(),
        operation.preposition(),
        files.len()
    );
    println!("\n{}", "Affected files:".bold());
    for (i, file) in files.iter().enumerate().take(PREVIEW_LIMIT) {
        println!("  {}. {}", i + 1, output::file_line(file, false));
    }
    if files.len() > PREVIEW_LIMIT {
        println!("  ... and {} more", files.len() - PREVIEW_LIMIT);
    }
    println!("\n{}", "Run without --dry-run to apply changes.".yellow());
}

fn confirm_bulk_operation(count: usize, label: &str, operation: BulkOperation) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "{} {label} {} {count} file(s)?",
            operation.verb().to_uppercase(),
            operation.preposition()
        ))
        .interact()
        .map_err(|e| TagliatelleError::InvalidInput(format!("Failed to get confirmation: {e}")))
}
