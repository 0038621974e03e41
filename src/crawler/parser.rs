//! HTML parser for link discovery
//!
//! Every successfully fetched page is scanned for outbound links, whether or
//! not the page itself is an article. Links are resolved against the page URL
//! and returned in document order; the frontier decides which of them to keep.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Parses raw markup into a queryable document
///
/// html5ever recovers from malformed markup, so parsing itself never fails.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts all resolvable links from the document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a href="...">`, resolved against `base_url`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - fragment-only links
/// - anything that is not HTTP(S) after resolution
///
/// Duplicates are kept; the frontier filters them.
///
/// # Example
///
/// ```
/// use article_harvester::crawler::{extract_links, parse_document};
/// use url::Url;
///
/// let document = parse_document(r#"<a href="/clanek/1">Zpráva</a>"#);
/// let base_url = Url::parse("https://www.novinky.cz/").unwrap();
/// let links = extract_links(&document, &base_url);
/// assert_eq!(links, vec!["https://www.novinky.cz/clanek/1".to_string()]);
/// ```
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(href) = element.value().attr("href") {
            match resolve_link(href, base_url) {
                Ok(absolute_url) => links.push(absolute_url.to_string()),
                Err(e) => tracing::trace!("Skipping link {:?}: {}", href, e),
            }
        }
    }

    links
}

/// Convenience function for extracting just the links from raw HTML
pub fn extract_links_simple(html: &str, base_url: &Url) -> Vec<String> {
    extract_links(&parse_document(html), base_url)
}
