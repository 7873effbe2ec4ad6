use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// I/O error when reading an alias import file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Alias payload is not valid JSON of the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Alias group with an empty category or no usable aliases
    #[error("Invalid alias group: {0}")]
    InvalidGroup(String),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, SchemaError>;
