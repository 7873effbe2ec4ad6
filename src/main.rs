//! Tagliatelle CLI application entry point
//!
//! Catalogues files with `category:value` tags and lists them through
//! filter paths.
//!
//! # Usage
//!
//! ```bash
//! # Register a file and tag it
//! tagliatelle files add uploads/cat.jpg -d "a cat"
//! tagliatelle tag 1 color red
//!
//! # Copy the value last used for a category
//! tagliatelle tag 2 color !
//!
//! # Filter, with aliases applied
//! tagliatelle filter /tag/color/red/and/tag/size/large
//! tagliatelle filter /tag/color/previews
//!
//! # Bulk changes
//! tagliatelle bulk -r 1-20 -c mood --value calm
//! tagliatelle bulk --query "color:red OR color:blue" -c mood -o remove -y
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/tagliatelle/config.toml` (created with
//! defaults on first run) and `TAGLIATELLE_*` environment variables.

use tagliatelle::{
    TagliatelleError,
    cli::{Cli, Commands},
    commands,
    config::TagliatelleConfig,
    db::Database,
    logging,
    schema::AliasStore,
};
use tracing::debug;

type Result<T> = std::result::Result<T, TagliatelleError>;

/// Main entry point
///
/// # Errors
///
/// Returns `TagliatelleError` if configuration loading fails, the database
/// cannot be opened, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => TagliatelleConfig::load_from(path)?,
        None => TagliatelleConfig::load()?,
    };
    let aliases = AliasStore::new(config.tag_aliases.clone());

    if let Commands::Aliases(command) = &cli.command {
        return commands::aliases(command, &mut config, &aliases, cli.quiet);
    }

    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path.clone());
    debug!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path)?;
    let per_page = config.page_size();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Files(command) => commands::files(&db, command, per_page, quiet)?,
        Commands::Tag { id, category, value } => {
            commands::tag(&db, id, &category, &value, quiet)?;
        }
        Commands::Untag { id, category, value } => {
            commands::tag::untag(&db, id, &category, &value, quiet)?;
        }
        Commands::Filter { path, page } => {
            commands::filter(&db, &aliases.snapshot(), &path, page, per_page, quiet)?;
        }
        Commands::Bulk(args) => commands::bulk(&db, &args, quiet)?,
        Commands::Tags => commands::tags(&db, quiet)?,
        Commands::Categories => commands::tags::categories(&db, quiet)?,
        Commands::Aliases(_) => {}
    }

    Ok(())
}
