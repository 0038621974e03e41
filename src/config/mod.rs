//! Configuration module for Article-Harvester
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing configuration falls back to [`Config::default`], which carries the
//! stock seed list and article patterns.
//!
//! # Example
//!
//! ```no_run
//! use article_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Crawler will stop after {} articles", config.crawler.max_articles);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SeedConfig, UserAgentConfig, DEFAULT_ARTICLE_PATTERNS,
    DEFAULT_SEED_URLS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
