//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The frontier (FIFO queue plus visited set)
//! - HTTP fetching
//! - Link discovery and article extraction
//! - Checkpointing of the result set
//! - Overall crawl coordination

mod checkpoint;
mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;

pub use checkpoint::Checkpointer;
pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{extract_article, extract_article_from_html, ExtractError};
pub use fetcher::{build_http_client, fetch_url, FetchError, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::{extract_links, extract_links_simple, parse_document};

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and JSON sink
/// 2. Seed the frontier
/// 3. Fetch pages, extract articles and follow article links
/// 4. Checkpoint along the way and save once more at the end
pub async fn crawl(config: Config) -> Result<CrawlStatistics, HarvestError> {
    run_crawl(config).await
}
