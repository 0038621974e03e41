//! Checkpointing of the growing result set
//!
//! After every extracted article the coordinator hands the full result set to
//! [`Checkpointer::observe`]. A snapshot is written whenever the size has
//! crossed a multiple of the interval since the last successful write, so a
//! failed write is retried at the next extraction instead of waiting for the
//! next exact multiple.
//!
//! Writes always replace the whole sink; nothing is appended.

use crate::models::Article;
use crate::storage::{ArticleSink, StorageResult};

/// Decides when to flush and performs the flush
#[derive(Debug)]
pub struct Checkpointer<S> {
    sink: S,
    interval: usize,
    last_persisted_len: usize,
    checkpoints_written: usize,
    failures: usize,
}

impl<S: ArticleSink> Checkpointer<S> {
    /// Creates a checkpointer writing to `sink` every `interval` articles
    ///
    /// An interval of zero is treated as one.
    pub fn new(sink: S, interval: usize) -> Self {
        Self {
            sink,
            interval: interval.max(1),
            last_persisted_len: 0,
            checkpoints_written: 0,
            failures: 0,
        }
    }

    /// Returns true if a result set of `len` records should be written now
    pub fn is_due(&self, len: usize) -> bool {
        len > 0 && len / self.interval > self.last_persisted_len / self.interval
    }

    /// Writes `articles` if a checkpoint is due
    ///
    /// Write failures are logged and swallowed; the crawl keeps going and the
    /// next call retries. Returns true if a snapshot was written.
    pub fn observe(&mut self, articles: &[Article]) -> bool {
        if !self.is_due(articles.len()) {
            return false;
        }

        match self.write(articles) {
            Ok(()) => {
                tracing::info!(
                    count = articles.len(),
                    sink = %self.sink.describe(),
                    "Checkpoint saved"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    count = articles.len(),
                    sink = %self.sink.describe(),
                    "Checkpoint failed, will retry at next article: {}",
                    e
                );
                false
            }
        }
    }

    /// Unconditionally writes `articles`, retrying once on failure
    ///
    /// Called once when the run ends. An error here means the in-memory
    /// result set could not be saved.
    pub fn finalize(&mut self, articles: &[Article]) -> StorageResult<()> {
        if let Err(first) = self.write(articles) {
            tracing::warn!(
                sink = %self.sink.describe(),
                "Final save failed, retrying once: {}",
                first
            );
            if let Err(second) = self.write(articles) {
                tracing::error!(
                    count = articles.len(),
                    sink = %self.sink.describe(),
                    "Final save failed: {}",
                    second
                );
                return Err(second);
            }
        }

        tracing::info!(
            count = articles.len(),
            sink = %self.sink.describe(),
            "Final save complete"
        );
        Ok(())
    }

    fn write(&mut self, articles: &[Article]) -> StorageResult<()> {
        match self.sink.persist(articles) {
            Ok(()) => {
                self.last_persisted_len = articles.len();
                self.checkpoints_written += 1;
                Ok(())
            }
            Err(e) => {
                self.failures += 1;
                Err(e)
            }
        }
    }

    /// Size of the result set at the last successful write
    pub fn last_persisted_len(&self) -> usize {
        self.last_persisted_len
    }

    /// Successful writes so far, final save included
    pub fn checkpoints_written(&self) -> usize {
        self.checkpoints_written
    }

    /// Failed write attempts so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
