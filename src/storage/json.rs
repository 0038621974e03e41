//! JSON file sink
//!
//! The articles file is a single pretty-printed JSON array (4-space indent,
//! non-ASCII kept literally). Each checkpoint serializes the whole result set
//! into a sibling `*.tmp` file and renames it over the target, so readers
//! never observe a half-written array.

use crate::models::Article;
use crate::storage::traits::{ArticleSink, StorageResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sink that keeps the result set in one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current file contents back into records
    pub fn load(&self) -> StorageResult<Vec<Article>> {
        load_articles(&self.path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "articles.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ArticleSink for JsonFileStorage {
    fn persist(&mut self, articles: &[Article]) -> StorageResult<()> {
        let bytes = to_pretty_json(articles)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = articles.len(),
            "Wrote articles file"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes records as a JSON array indented with four spaces
pub fn to_pretty_json(articles: &[Article]) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    articles.serialize(&mut serializer)?;
    Ok(buf)
}

/// Loads an articles file written by [`JsonFileStorage`]
pub fn load_articles(path: &Path) -> StorageResult<Vec<Article>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
