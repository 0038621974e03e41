//! Data model for extracted articles
//!
//! [`Article`] is the only record the crawler persists. Fields that cannot be
//! resolved from a page carry a fixed sentinel value rather than being left
//! out, so every record in the output file has the same shape.

use serde::{Deserialize, Serialize};

/// Title used when a page has no `<h1>`
pub const UNKNOWN_TITLE: &str = "Neznámý nadpis";

/// Category used when no category marker is found
pub const UNKNOWN_CATEGORY: &str = "Neznámá kategorie";

/// Comment count used when the comment link is missing
pub const DEFAULT_COMMENTS: &str = "0";

/// Date used when a page has no `<time>` element
pub const UNKNOWN_DATE: &str = "Neznámé datum";

/// One extracted article page
///
/// Serialized with keys in declaration order:
/// `url, title, category, comments, images, content, date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// The page the record was extracted from
    pub url: String,
    /// Text of the first `<h1>`, trimmed
    pub title: String,
    /// Resolved through the metadata fallback chain
    pub category: String,
    /// Comment count as displayed on the page
    pub comments: String,
    /// Number of `<img>` elements anywhere in the document
    pub images: u32,
    /// All paragraph text, space-joined in document order
    pub content: String,
    /// Machine-readable `datetime` of the first `<time>` element
    pub date: String,
}

impl Article {
    /// Creates a record for `url` with every field at its sentinel value
    pub fn unresolved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: UNKNOWN_TITLE.to_string(),
            category: UNKNOWN_CATEGORY.to_string(),
            comments: DEFAULT_COMMENTS.to_string(),
            images: 0,
            content: String::new(),
            date: UNKNOWN_DATE.to_string(),
        }
    }

    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN_TITLE
    }

    pub fn has_category(&self) -> bool {
        self.category != UNKNOWN_CATEGORY
    }

    pub fn has_date(&self) -> bool {
        self.date != UNKNOWN_DATE
    }
}
