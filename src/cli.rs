//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagliatelle using the `clap` crate.
//!
//! # Commands
//!
//! - **files**: register, show, list, rename, describe and remove file records
//! - **tag** / **untag**: change one file's tags (`!` copies the previous value)
//! - **filter**: evaluate a `/tag/<category>/<value>` path
//! - **bulk**: add or remove one tag across an ID range or tag query
//! - **tags** / **categories**: overviews
//! - **aliases**: inspect and replace alias groups

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::bulk::BulkOperation;
use crate::selection::BulkSelection;

#[derive(Parser, Debug)]
#[command(name = "tagliatelle")]
#[command(about = "Catalogue files with category:value tags", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use this database file (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage file records
    #[command(subcommand, visible_alias = "f")]
    Files(FilesCommands),

    /// Attach a tag to one file
    #[command(visible_alias = "t")]
    Tag {
        /// File ID
        id: i64,
        /// Tag category
        category: String,
        /// Tag value, or `!` to copy the last value used in this category
        value: String,
    },

    /// Detach a tag from one file
    Untag {
        /// File ID
        id: i64,
        /// Tag category
        category: String,
        /// Tag value
        value: String,
    },

    /// List files matching a filter path such as /tag/color/red/and/tag/size/large
    Filter {
        /// Filter path
        #[arg(value_name = "PATH")]
        path: String,

        /// Page number
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },

    /// Add or remove a tag on many files at once
    Bulk(BulkArgs),

    /// Show every tag in use with its file count
    Tags,

    /// List category names
    Categories,

    /// Manage alias groups
    #[command(subcommand)]
    Aliases(AliasCommands),
}

#[derive(Subcommand, Debug)]
pub enum FilesCommands {
    /// Register a file record
    Add {
        /// Path of the stored file
        path: PathBuf,

        /// Optional description
        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,
    },

    /// Show one file with its tags
    Show {
        id: i64,
    },

    /// List tagged files, newest first
    #[command(visible_alias = "ls")]
    List {
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },

    /// List files without any tag, newest first
    Untagged {
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,
    },

    /// Rename a file record
    #[command(visible_alias = "mv")]
    Rename {
        id: i64,
        /// New filename
        name: String,
    },

    /// Replace a file's description
    Describe {
        id: i64,
        text: String,
    },

    /// Remove a file record and its tags
    #[command(visible_alias = "rm")]
    Remove {
        id: i64,

        /// Skip confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").required(true).args(["range", "query"])))]
pub struct BulkArgs {
    /// File IDs, e.g. 3,5-7,12
    #[arg(short = 'r', long = "range", value_name = "IDS")]
    pub range: Option<String>,

    /// Tag query, e.g. "color:red, size:large" or "color:red OR color:blue"
    #[arg(long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Tag category to change
    #[arg(short = 'c', long = "category")]
    pub category: String,

    /// Tag value (omit with remove to clear the whole category)
    #[arg(long = "value", default_value = "")]
    pub value: String,

    /// add or remove
    #[arg(short = 'o', long = "operation", default_value = "add")]
    pub operation: String,

    /// Show what would change without writing
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Skip confirmation
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

impl BulkArgs {
    /// The selection given on the command line
    ///
    /// A range takes precedence; clap guarantees at least one is present.
    #[must_use]
    pub fn selection(&self) -> BulkSelection {
        match (&self.range, &self.query) {
            (Some(range), _) => BulkSelection::Range(range.clone()),
            (None, Some(query)) => BulkSelection::Query(query.clone()),
            (None, None) => BulkSelection::Range(String::new()),
        }
    }

    /// # Errors
    /// Returns `BulkError::InvalidOperation` for anything but add/remove.
    pub fn operation(&self) -> Result<BulkOperation, crate::bulk::BulkError> {
        self.operation.parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// List configured alias groups
    #[command(visible_alias = "ls")]
    List,

    /// Show what a value expands to
    Show {
        category: String,
        value: String,
    },

    /// Replace all alias groups from a JSON file
    Import {
        /// JSON file: [{"category": "...", "aliases": ["...", "..."]}]
        file: PathBuf,
    },

    /// Remove all alias groups
    Clear {
        /// Skip confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}
