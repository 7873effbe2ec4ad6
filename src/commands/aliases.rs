//! Alias group commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::AliasCommands;
use crate::config::TagliatelleConfig;
use crate::schema::{AliasGroup, AliasStore, load_alias_file};
use crate::TagliatelleError;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Execute alias management commands
///
/// Saving replaces the configured list wholesale and swaps the store's
/// snapshot, so later lookups in this process see the new groups.
///
/// # Errors
/// Returns error if the import file is invalid or the config cannot be saved
pub fn execute(
    command: &AliasCommands,
    config: &mut TagliatelleConfig,
    store: &AliasStore,
    quiet: bool,
) -> Result<()> {
    match command {
        AliasCommands::List => {
            list_groups(store.snapshot().groups(), quiet);
            Ok(())
        }
        AliasCommands::Show { category, value } => {
            let expanded = store.snapshot().expand(category, value);
            if quiet {
                println!("{}", expanded.join("\n"));
            } else {
                println!(
                    "{} {} {}",
                    format!("{category}:{value}").cyan(),
                    "→".dimmed(),
                    expanded.join(", ").yellow()
                );
            }
            Ok(())
        }
        AliasCommands::Import { file } => {
            let groups = load_alias_file(file)?;
            let count = groups.len();
            save(config, store, groups)?;
            if !quiet {
                println!("{} Saved {count} alias group(s)", "✓".green().bold());
            }
            Ok(())
        }
        AliasCommands::Clear { yes } => {
            if !yes && !confirm_clear()? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            save(config, store, Vec::new())?;
            if !quiet {
                println!("{} Removed all alias groups", "✓".green().bold());
            }
            Ok(())
        }
    }
}

/// Persist `groups` as the full alias list and refresh the snapshot
///
/// # Errors
/// Returns error if the config cannot be saved
pub fn save(config: &mut TagliatelleConfig, store: &AliasStore, groups: Vec<AliasGroup>) -> Result<()> {
    config.replace_aliases(groups.clone())?;
    store.replace(groups);
    Ok(())
}

fn list_groups(groups: &[AliasGroup], quiet: bool) {
    if groups.is_empty() {
        if !quiet {
            println!("{}", "No alias groups defined".dimmed());
        }
        return;
    }

    let width = groups.iter().map(|g| g.category.len()).max().unwrap_or(0);
    for group in groups {
        if quiet {
            println!("{}:{}", group.category, group.aliases.join(","));
        } else {
            println!(
                "  {:<width$} {} {}",
                group.category.cyan(),
                "=".dimmed(),
                group.aliases.join(", ").yellow(),
            );
        }
    }
    if !quiet {
        println!("\n{} group(s) total", groups.len().to_string().bold());
    }
}

fn confirm_clear() -> Result<bool> {
    Confirm::new()
        .with_prompt("Remove ALL alias groups?")
        .default(false)
        .interact()
        .map_err(|e| TagliatelleError::InvalidInput(format!("Failed to get confirmation: {e}")))
}
