//! Article-Harvester main entry point
//!
//! This is the command-line interface for the Article-Harvester news crawler.
//!
//! Run with no arguments it performs the stock crawl with built-in defaults.
//! The optional config path and flags (`--output`, `--dry-run`, `--stats`,
//! `-v`/`-q`) are additions on top of that no-argument behavior.

use anyhow::Context;
use article_harvester::config::{load_config_with_hash, Config};
use article_harvester::crawler::crawl;
use article_harvester::output::{print_article_summary, summarize_file};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Article-Harvester: a bounded news article crawler
///
/// Article-Harvester crawls a fixed set of news sites breadth-first,
/// extracts article records from article-shaped URLs, and saves them to a
/// JSON file, checkpointing as it goes.
#[derive(Parser, Debug)]
#[command(name = "article-harvester")]
#[command(version)]
#[command(about = "A bounded news article crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write articles to this file instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Summarize an existing articles file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load(path)?,
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.articles_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Loads and validates the configuration file
fn load(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("article_harvester=info,warn"),
            1 => EnvFilter::new("article_harvester=debug,info"),
            2 => EnvFilter::new("article_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Article-Harvester Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max articles: {}", config.crawler.max_articles);
    println!("  Checkpoint interval: {}", config.crawler.checkpoint_interval);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Articles: {}", config.output.articles_path);

    println!("\nSeed URLs ({}):", config.seeds.urls.len());
    for seed in &config.seeds.urls {
        println!("  - {}", seed);
    }

    println!("\nArticle Patterns ({}):", config.seeds.article_patterns.len());
    for pattern in &config.seeds.article_patterns {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the articles file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.articles_path);
    println!("Articles file: {}\n", path.display());

    let summary = summarize_file(path)
        .with_context(|| format!("Failed to read articles from {}", path.display()))?;
    print_article_summary(&summary);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Seeds: {}, article patterns: {}, output: {}",
        config.seeds.urls.len(),
        config.seeds.article_patterns.len(),
        config.output.articles_path
    );

    let path = config.output.articles_path.clone();
    match crawl(config).await {
        Ok(stats) => {
            tracing::info!(
                "Crawl finished: {} articles saved to {}",
                stats.articles_saved(),
                path
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
