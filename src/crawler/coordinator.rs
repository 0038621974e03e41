//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding and draining the frontier
//! - Fetching pages, optionally several at a time
//! - Extracting articles and harvesting links
//! - Checkpointing the result set
//! - Stopping on frontier exhaustion, the article cap, or a shutdown signal
//!
//! Fetches within a batch run concurrently, but their results are processed
//! one by one in dequeue order. Link offering, the article cap and the
//! checkpoint cadence therefore behave exactly as in a sequential crawl.

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::checkpoint::Checkpointer;
use crate::crawler::extractor::extract_article;
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{extract_links, parse_document};
use crate::models::Article;
use crate::output::{log_statistics, CrawlStatistics};
use crate::state::{PageOutcome, RunState, TerminationReason};
use crate::storage::{open_storage, ArticleSink, JsonFileStorage};
use crate::url::ArticlePatterns;
use crate::HarvestError;
use futures::future::join_all;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator<F, S> {
    config: CrawlerConfig,
    frontier: Frontier,
    fetcher: F,
    checkpointer: Checkpointer<S>,
    articles: Vec<Article>,
    stats: CrawlStatistics,
    state: RunState,
}

impl Coordinator<HttpFetcher, JsonFileStorage> {
    /// Creates a coordinator that fetches over HTTP and writes the JSON file
    /// named in the output configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The configuration is invalid or the HTTP
    ///   client could not be built
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        validate(config)?;
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let fetcher = HttpFetcher::from_config(&config.user_agent, timeout)?;
        let sink = open_storage(Path::new(&config.output.articles_path));
        Ok(Self::new(config, fetcher, sink))
    }
}

impl<F: Fetcher, S: ArticleSink> Coordinator<F, S> {
    /// Creates a coordinator and seeds its frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Page retrieval backend
    /// * `sink` - Where checkpoints are written
    pub fn new(config: &Config, fetcher: F, sink: S) -> Self {
        let mut frontier = Frontier::new(ArticlePatterns::from(&config.seeds));
        frontier.seed(config.seeds.urls.iter().cloned());

        tracing::info!(
            "Seeded frontier with {} URLs, {} article patterns",
            frontier.pending_len(),
            config.seeds.article_patterns.len()
        );

        Self {
            config: config.crawler.clone(),
            frontier,
            fetcher,
            checkpointer: Checkpointer::new(sink, config.crawler.checkpoint_interval),
            articles: Vec::new(),
            stats: CrawlStatistics::new(),
            state: RunState::Running,
        }
    }

    /// Runs the crawl until the frontier is exhausted or the article cap is hit
    pub async fn run(&mut self) -> Result<CrawlStatistics, HarvestError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the crawl, stopping early when `shutdown` resolves
    ///
    /// This is the core crawling logic that:
    /// 1. Dequeues the next batch of unvisited URLs
    /// 2. Fetches them concurrently, racing the shutdown signal
    /// 3. For each page in dequeue order: extracts an article if the URL is
    ///    article-shaped, offers its links to the frontier, and checkpoints
    /// 4. Saves the full result set once more, whatever ended the run
    ///
    /// Only a failed final save is returned as an error.
    pub async fn run_until<Fut>(&mut self, shutdown: Fut) -> Result<CrawlStatistics, HarvestError>
    where
        Fut: Future<Output = ()>,
    {
        if !self.state.is_running() {
            return Ok(self.stats.clone());
        }

        tracing::info!(
            "Starting crawl: cap {} articles, checkpoint every {}, {} concurrent fetches",
            self.config.max_articles,
            self.checkpointer.interval(),
            self.batch_size()
        );

        tokio::pin!(shutdown);

        let reason = loop {
            if self.cap_reached() {
                tracing::info!("Article cap of {} reached", self.config.max_articles);
                break TerminationReason::ArticleCap;
            }

            let batch = self.next_batch();
            if batch.is_empty() {
                tracing::info!("Frontier is empty, crawl complete");
                break TerminationReason::FrontierExhausted;
            }

            let fetches = join_all(batch.iter().map(|url| self.fetcher.fetch(url)));

            let results = tokio::select! {
                results = fetches => results,
                _ = &mut shutdown => {
                    tracing::warn!(
                        "Shutdown requested, abandoning {} in-flight fetches",
                        batch.len()
                    );
                    break TerminationReason::Cancelled;
                }
            };

            for (url, result) in batch.iter().zip(results) {
                if self.cap_reached() {
                    break;
                }
                self.process_page(url, result);
            }
        };

        self.finish(reason)
    }

    /// Dequeues up to `max_concurrent_fetches` URLs, marking each visited
    fn next_batch(&mut self) -> Vec<String> {
        let mut batch = Vec::with_capacity(self.batch_size());
        while batch.len() < self.batch_size() {
            match self.frontier.next() {
                Some(url) => {
                    tracing::info!("Visiting: {}", url);
                    batch.push(url);
                }
                None => break,
            }
        }
        batch
    }

    /// Handles one fetched (or failed) URL
    ///
    /// Extraction failures are isolated to the page: links are still
    /// harvested and the crawl moves on.
    fn process_page(&mut self, url: &str, result: Result<String, FetchError>) {
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", url, e);
                self.stats.record_page(PageOutcome::FetchFailed);
                return;
            }
        };

        let document = parse_document(&body);

        let outcome = if self.frontier.is_article(url) {
            match extract_article(url, &document) {
                Ok(article) => {
                    tracing::info!(
                        count = self.articles.len() + 1,
                        "Article saved: {}",
                        article.title
                    );
                    self.articles.push(article);
                    PageOutcome::Extracted
                }
                Err(e) => {
                    tracing::warn!("Failed to extract article from {}: {}", url, e);
                    PageOutcome::ExtractFailed
                }
            }
        } else {
            tracing::debug!("Not an article, harvesting links only: {}", url);
            PageOutcome::NotArticle
        };

        match Url::parse(url) {
            Ok(base_url) => self.offer_links(&extract_links(&document, &base_url)),
            Err(e) => tracing::warn!("Cannot resolve links on {}: {}", url, e),
        }

        self.stats.record_page(outcome);

        if outcome == PageOutcome::Extracted {
            self.checkpointer.observe(&self.articles);
        }
    }

    /// Offers discovered links to the frontier in document order
    fn offer_links(&mut self, links: &[String]) {
        let mut enqueued = 0u64;
        for link in links {
            if self.frontier.offer(link) {
                enqueued += 1;
            }
        }

        self.stats.links_discovered += links.len() as u64;
        self.stats.links_enqueued += enqueued;

        tracing::debug!(
            "Discovered {} links, enqueued {}, {} pending",
            links.len(),
            enqueued,
            self.frontier.pending_len()
        );
    }

    /// Moves the run to `Done` and performs the final save
    fn finish(&mut self, reason: TerminationReason) -> Result<CrawlStatistics, HarvestError> {
        self.state.finish(reason);
        let saved = self.checkpointer.finalize(&self.articles);

        self.stats.checkpoints_written = self.checkpointer.checkpoints_written() as u64;
        self.stats.checkpoint_failures = self.checkpointer.failures() as u64;
        self.stats.finish(reason);
        log_statistics(&self.stats);

        saved?;
        Ok(self.stats.clone())
    }

    fn cap_reached(&self) -> bool {
        self.articles.len() >= self.config.max_articles
    }

    fn batch_size(&self) -> usize {
        self.config.max_concurrent_fetches.max(1)
    }

    /// Articles extracted so far, in extraction order
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        self.checkpointer.sink()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP client and JSON sink from the configuration
/// 2. Seed the frontier
/// 3. Crawl until the frontier is exhausted, the article cap is hit,
///    or Ctrl-C is pressed
/// 4. Save the result set one final time
///
/// # Example
///
/// ```no_run
/// use article_harvester::config::Config;
/// use article_harvester::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(Config::default()).await?;
/// println!("Saved {} articles", stats.articles_saved());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> crate::Result<CrawlStatistics> {
    let mut coordinator = Coordinator::from_config(&config)?;
    coordinator
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}
