//! Error types for filter parsing
//!
//! Every variant carries the fragment of user input that failed so the
//! message can point at it.

use thiserror::Error;

/// Errors that can occur while parsing user filter input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A path segment did not split into `<category>/<value>`
    #[error("Malformed filter path segment: '{0}'")]
    MalformedFilterPath(String),

    /// A tag query piece is not `category:value`
    #[error("Invalid tag syntax '{0}', expected category:value")]
    InvalidTagSyntax(String),

    /// Nothing to select
    #[error("Query is empty")]
    EmptyQuery,

    /// A range token is not `N` or `N-M` with N <= M
    #[error("Invalid range: '{0}'")]
    InvalidRange(String),
}
