//! Tagliatelle - a tag query and bulk-mutation engine for media catalogues
//!
//! Files are annotated with `category:value` tags stored in SQLite. This
//! library parses filter expressions (path filters with alias groups, AND/OR
//! tag queries, ID ranges), compiles them into parameterized set predicates
//! and applies bulk tag changes atomically.

use thiserror::Error;

pub mod bulk;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod filters;
pub mod logging;
pub mod output;
pub mod pagination;
pub mod predicate;
pub mod schema;
pub mod selection;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagliatelleError {
    /// Tag store error
    #[error(transparent)]
    Db(#[from] db::DbError),
    /// Filter input could not be parsed
    #[error(transparent)]
    Filter(#[from] filters::FilterError),
    /// Selection could not be resolved
    #[error(transparent)]
    Selection(#[from] selection::SelectionError),
    /// Bulk mutation failed and was rolled back
    #[error(transparent)]
    Bulk(#[from] bulk::BulkError),
    /// Alias groups could not be loaded
    #[error("Alias error: {0}")]
    Schema(#[from] schema::SchemaError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
