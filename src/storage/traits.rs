//! Storage traits and error types
//!
//! This module defines the trait interface for article sinks and
//! associated error types.

use crate::models::Article;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for checkpointed result sets
///
/// Every call to [`ArticleSink::persist`] receives the *entire* current result
/// set and must replace whatever the sink held before. Sinks are never asked
/// to append.
pub trait ArticleSink {
    /// Overwrites the sink with `articles`
    fn persist(&mut self, articles: &[Article]) -> StorageResult<()>;

    /// Short human-readable name used in log lines
    fn describe(&self) -> String;
}
