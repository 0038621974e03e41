//! Storage module for persisting the article result set
//!
//! This module handles:
//! - The `ArticleSink` trait every checkpoint writes through
//! - The JSON file sink used by the binary
//! - An in-memory sink that records each snapshot

mod json;
mod memory;
mod traits;

pub use json::{load_articles, to_pretty_json, JsonFileStorage};
pub use memory::MemoryStorage;
pub use traits::{ArticleSink, StorageError, StorageResult};

use std::path::Path;

/// Opens the JSON sink at `path`
///
/// Nothing is written until the first checkpoint.
pub fn open_storage(path: &Path) -> JsonFileStorage {
    JsonFileStorage::new(path)
}
