//! Error types for enumeration construction and restore

use thiserror::Error;

/// Result type for enumeration operations
pub type Result<T> = std::result::Result<T, EnumError>;

/// Enumeration factory errors
#[derive(Error, Debug)]
pub enum EnumError {
    #[error("Argument must be a string or an array of strings, got {0}")]
    InvalidInput(String),

    #[error("bad enum key: {0}")]
    InvalidKey(String),

    #[error("Duplicate enum key: {0}")]
    DuplicateKey(String),

    #[error("Keys {first} and {second} both derive predicate {predicate}")]
    PredicateCollision {
        predicate: String,
        first: String,
        second: String,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Malformed enumerant: {0}")]
    MalformedEnumerant(String),

    #[error("Not a valid Rust identifier: {0}")]
    InvalidIdentifier(String),
}
