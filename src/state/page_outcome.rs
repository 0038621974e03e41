/// Page outcome definitions for tracking crawl progress
///
/// Every dequeued URL ends in exactly one of these outcomes.
use std::fmt;

/// What happened to a single dequeued URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Fetched, matched an article pattern and produced a record
    Extracted,

    /// Fetched, but the URL is not article-shaped; only links were harvested
    NotArticle,

    /// Fetched and article-shaped, but extraction failed; links were still harvested
    ExtractFailed,

    /// Network error, timeout or non-success status; the URL is dropped for the run
    FetchFailed,
}

impl PageOutcome {
    /// Returns true if the page body was retrieved
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::FetchFailed)
    }

    /// Returns true if this outcome represents an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::ExtractFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::NotArticle => "not_article",
            Self::ExtractFailed => "extract_failed",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
