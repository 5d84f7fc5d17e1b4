//! Error types for dbtree

use thiserror::Error;

/// Core error type for backend operations
#[derive(Error, Debug)]
pub enum DbTreeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dbtree operations
pub type Result<T> = std::result::Result<T, DbTreeError>;
