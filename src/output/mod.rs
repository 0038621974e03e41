//! Output module for crawl statistics and reports
//!
//! This module handles:
//! - Recording per-run crawl statistics
//! - Summarizing a saved articles file

pub mod stats;

pub use stats::{
    log_statistics, print_article_summary, summarize_articles, ArticleSummary, CrawlStatistics,
};

use crate::storage::load_articles;
use crate::HarvestError;
use std::path::Path;

/// Loads the articles file at `path` and summarizes it
pub fn summarize_file(path: &Path) -> Result<ArticleSummary, HarvestError> {
    let articles = load_articles(path)?;
    Ok(summarize_articles(&articles))
}
