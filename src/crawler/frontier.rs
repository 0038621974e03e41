//! Frontier for managing the crawl queue and visited set
//!
//! This module handles:
//! - FIFO ordering of candidate URLs (breadth-first by discovery order)
//! - At-most-once visitation via a test-and-set on the visited set
//! - The article-pattern gate applied to every discovered link
//!
//! Duplicates are tolerated in the pending queue and filtered when popped,
//! so a URL offered twice before it is visited still gets fetched once.
//!
//! The visited set grows for the whole run. That is fine at the default cap
//! of 2000 articles but is the first thing to revisit for much larger crawls.

use crate::url::ArticlePatterns;
use std::collections::{HashSet, VecDeque};

/// Pending queue plus visited set for one crawl run
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Candidate URLs in enqueue order
    pending: VecDeque<String>,

    /// URLs already handed out by `next` (or explicitly marked)
    visited: HashSet<String>,

    /// Gate for discovered links
    patterns: ArticlePatterns,
}

impl Frontier {
    /// Creates an empty frontier that admits links matching `patterns`
    pub fn new(patterns: ArticlePatterns) -> Self {
        Self {
            pending: VecDeque::new(),
            visited: HashSet::new(),
            patterns,
        }
    }

    /// Enqueues the starting URLs
    ///
    /// Seeds bypass the pattern gate: a bare home page is rarely
    /// article-shaped but is where link discovery has to begin.
    pub fn seed<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            let url = url.into();
            if !self.visited.contains(&url) {
                self.pending.push_back(url);
            }
        }
    }

    /// Removes and returns the earliest-enqueued URL not yet visited
    ///
    /// The returned URL is marked visited in the same step, so it can never be
    /// handed out again, whether or not its fetch later succeeds.
    pub fn next(&mut self) -> Option<String> {
        while let Some(url) = self.pending.pop_front() {
            if self.mark_visited(&url) {
                return Some(url);
            }
            tracing::trace!("Skipping already visited URL: {}", url);
        }
        None
    }

    /// Records `url` as visited
    ///
    /// Returns true if the URL was not visited before. Idempotent.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Offers a discovered URL as a future candidate
    ///
    /// The URL is enqueued only if it has not been visited and matches at
    /// least one article pattern. Returns whether it was enqueued.
    pub fn offer(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || !self.patterns.matches(url) {
            return false;
        }
        self.pending.push_back(url.to_string());
        true
    }

    /// Returns true if `url` has been visited this run
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if `url` matches the article patterns
    pub fn is_article(&self, url: &str) -> bool {
        self.patterns.matches(url)
    }

    /// Number of queued entries, including not-yet-filtered duplicates
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Returns whether the pending queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
