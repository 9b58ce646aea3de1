//! Common error types for revsent

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for revsent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline-level errors
///
/// Per-line decode problems are not represented here; they are
/// [`ParseFailure`](crate::record::ParseFailure) values absorbed by the worker pool.
#[derive(Error, Debug)]
pub enum Error {
    /// Persistence sink failure (wraps sqlx::Error)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Review source file does not exist
    #[error("Review source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid value read back from storage or supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Aggregation requested over zero records
    #[error("No data: the result set is empty")]
    EmptyDataset,
}
