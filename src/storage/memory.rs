//! In-memory sink
//!
//! Keeps every snapshot it was handed, which makes checkpoint cadence
//! observable to callers embedding the crawler and to tests.

use crate::models::Article;
use crate::storage::traits::{ArticleSink, StorageError, StorageResult};

/// Sink that records each persisted snapshot in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    snapshots: Vec<Vec<Article>>,
    failures_remaining: usize,
    failed_attempts: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` persist calls fail with [`StorageError::Unavailable`]
    pub fn fail_next(&mut self, count: usize) {
        self.failures_remaining = count;
    }

    /// Every successfully persisted snapshot, oldest first
    pub fn snapshots(&self) -> &[Vec<Article>] {
        &self.snapshots
    }

    /// The most recent successful snapshot
    pub fn latest(&self) -> Option<&[Article]> {
        self.snapshots.last().map(Vec::as_slice)
    }

    /// Record counts of each successful snapshot
    pub fn snapshot_sizes(&self) -> Vec<usize> {
        self.snapshots.iter().map(Vec::len).collect()
    }

    pub fn failed_attempts(&self) -> usize {
        self.failed_attempts
    }
}

impl ArticleSink for MemoryStorage {
    fn persist(&mut self, articles: &[Article]) -> StorageResult<()> {
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            self.failed_attempts += 1;
            return Err(StorageError::Unavailable(
                "simulated write failure".to_string(),
            ));
        }

        self.snapshots.push(articles.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
