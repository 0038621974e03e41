//! Crawl statistics and article file summaries
//!
//! [`CrawlStatistics`] is filled in by the coordinator while a run is in
//! progress. [`ArticleSummary`] is computed from a saved articles file for the
//! `--stats` mode.

use crate::models::Article;
use crate::state::{PageOutcome, TerminationReason};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Counters for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run ended (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of URLs dequeued and attempted
    pub pages_visited: u64,

    /// Count of pages by outcome
    pub pages_by_outcome: HashMap<PageOutcome, u64>,

    /// Links found on fetched pages, before the frontier gate
    pub links_discovered: u64,

    /// Links the frontier accepted
    pub links_enqueued: u64,

    /// Successful writes to the sink, final save included
    pub checkpoints_written: u64,

    /// Failed writes to the sink
    pub checkpoint_failures: u64,

    /// Why the run ended
    pub termination: Option<TerminationReason>,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_by_outcome: HashMap::new(),
            links_discovered: 0,
            links_enqueued: 0,
            checkpoints_written: 0,
            checkpoint_failures: 0,
            termination: None,
        }
    }

    /// Records the outcome of one dequeued URL
    pub fn record_page(&mut self, outcome: PageOutcome) {
        self.pages_visited += 1;
        *self.pages_by_outcome.entry(outcome).or_insert(0) += 1;
    }

    /// Returns how many pages ended with `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.pages_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of article records produced
    pub fn articles_saved(&self) -> u64 {
        self.count(PageOutcome::Extracted)
    }

    /// Number of pages that ended in an error
    pub fn total_errors(&self) -> u64 {
        self.pages_by_outcome
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Stamps the end time and termination reason
    pub fn finish(&mut self, reason: TerminationReason) {
        self.finished_at = Some(Utc::now());
        self.termination = Some(reason);
    }

    /// Run duration in seconds, if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Pages visited per second, if finished
    pub fn pages_per_second(&self) -> Option<f64> {
        self.duration_seconds()
            .filter(|secs| *secs > 0.0)
            .map(|secs| self.pages_visited as f64 / secs)
    }
}

/// Logs crawl statistics at INFO level
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        pages_visited = stats.pages_visited,
        articles = stats.articles_saved(),
        not_articles = stats.count(PageOutcome::NotArticle),
        fetch_failures = stats.count(PageOutcome::FetchFailed),
        extract_failures = stats.count(PageOutcome::ExtractFailed),
        links_discovered = stats.links_discovered,
        links_enqueued = stats.links_enqueued,
        checkpoints = stats.checkpoints_written,
        checkpoint_failures = stats.checkpoint_failures,
        "Crawl statistics"
    );

    if let (Some(reason), Some(secs)) = (stats.termination, stats.duration_seconds()) {
        tracing::info!(
            "Run ended ({}) after {:.1}s, {:.2} pages/s",
            reason,
            secs,
            stats.pages_per_second().unwrap_or(0.0)
        );
    }
}

/// Summary of a saved articles file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleSummary {
    /// Number of records in the file
    pub total: usize,

    /// Records per category, sentinel category included
    pub by_category: BTreeMap<String, usize>,

    /// Records whose title is the sentinel
    pub untitled: usize,

    /// Records whose category is the sentinel
    pub uncategorized: usize,

    /// Records whose date is the sentinel
    pub undated: usize,

    /// Sum of image counts
    pub total_images: u64,
}

/// Builds a summary from a list of articles
pub fn summarize_articles(articles: &[Article]) -> ArticleSummary {
    let mut summary = ArticleSummary {
        total: articles.len(),
        ..ArticleSummary::default()
    };

    for article in articles {
        *summary
            .by_category
            .entry(article.category.clone())
            .or_insert(0) += 1;

        if !article.has_title() {
            summary.untitled += 1;
        }
        if !article.has_category() {
            summary.uncategorized += 1;
        }
        if !article.has_date() {
            summary.undated += 1;
        }
        summary.total_images += u64::from(article.images);
    }

    summary
}

/// Prints an article summary to stdout
pub fn print_article_summary(summary: &ArticleSummary) {
    println!("=== Article-Harvester Statistics ===\n");

    println!("Articles: {}", summary.total);
    println!("  Without title: {}", summary.untitled);
    println!("  Without category: {}", summary.uncategorized);
    println!("  Without date: {}", summary.undated);
    println!("  Images total: {}", summary.total_images);

    if !summary.by_category.is_empty() {
        let mut categories: Vec<(&String, &usize)> = summary.by_category.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        println!("\nBy category:");
        for (category, count) in categories {
            let percentage = (*count as f64 / summary.total as f64) * 100.0;
            println!("  {:<30} {:>6} ({:>5.1}%)", category, count, percentage);
        }
    }
}
