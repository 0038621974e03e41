use serde::Deserialize;

/// Seed URLs crawled when no configuration file overrides them
pub const DEFAULT_SEED_URLS: &[&str] = &[
    "https://www.novinky.cz",
    "https://www.idnes.cz",
    "https://www.ctk.cz",
];

/// Substrings identifying article-shaped URLs on the default seed domains
pub const DEFAULT_ARTICLE_PATTERNS: &[&str] = &["novinky.cz/clanek", "idnes.cz/", "ctk.cz/"];

/// Main configuration structure for Article-Harvester
///
/// Every section falls back to its defaults, so an empty file (or no file at
/// all) reproduces the stock crawl of the three Czech news sites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub seeds: SeedConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Stop once this many articles have been extracted
    #[serde(rename = "max-articles")]
    pub max_articles: usize,

    /// Persist the result set every time its size crosses a multiple of this
    #[serde(rename = "checkpoint-interval")]
    pub checkpoint_interval: usize,

    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_articles: 2000,
            checkpoint_interval: 5,
            max_concurrent_fetches: 1,
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ArticleHarvester".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/article-harvester".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON articles file, overwritten on every checkpoint
    #[serde(rename = "articles-path")]
    pub articles_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            articles_path: "articles.json".to_string(),
        }
    }
}

/// Where the crawl starts and which URLs count as articles
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Starting URLs, enqueued once at run start
    pub urls: Vec<String>,

    /// Substrings identifying article URLs
    #[serde(rename = "article-patterns")]
    pub article_patterns: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            urls: DEFAULT_SEED_URLS.iter().map(|s| s.to_string()).collect(),
            article_patterns: DEFAULT_ARTICLE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
