/// The set of substrings that mark a URL as article-shaped
///
/// A URL is an article candidate when it contains at least one of the
/// configured patterns anywhere in its text. Matching is plain substring
/// search and case-sensitive, so `"idnes.cz/"` matches
/// `https://www.idnes.cz/zpravy/domaci` but not `https://www.idnes.cz`.
///
/// # Examples
///
/// ```
/// use article_harvester::url::ArticlePatterns;
///
/// let patterns = ArticlePatterns::new(["novinky.cz/clanek", "idnes.cz/"]);
/// assert!(patterns.matches("https://www.novinky.cz/clanek/domaci-123"));
/// assert!(!patterns.matches("https://www.novinky.cz/sport"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePatterns {
    patterns: Vec<String>,
}

impl ArticlePatterns {
    /// Builds a matcher from any list of pattern strings
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the URL contains at least one pattern
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| url.contains(pattern.as_str()))
    }

    /// Returns the configured patterns in order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
