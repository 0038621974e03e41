//! URL handling module for Article-Harvester
//!
//! This module provides link resolution against the page a link was found on,
//! and article-path pattern matching used both to gate the frontier and to
//! decide which fetched pages get extracted.

mod matcher;
mod resolve;

pub use matcher::ArticlePatterns;
pub use resolve::resolve_link;

use crate::config::SeedConfig;

impl From<&SeedConfig> for ArticlePatterns {
    fn from(seeds: &SeedConfig) -> Self {
        ArticlePatterns::new(seeds.article_patterns.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_from_default_seed_config() {
        let patterns = ArticlePatterns::from(&SeedConfig::default());
        assert_eq!(patterns.len(), 3);
        assert!(patterns.matches("https://www.novinky.cz/clanek/1"));
        assert!(!patterns.matches("https://www.novinky.cz"));
    }
}
