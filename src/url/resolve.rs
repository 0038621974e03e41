use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a link href against the page it was found on
///
/// # Resolution Rules
///
/// 1. Trim surrounding whitespace; reject empty hrefs
/// 2. Reject `javascript:`, `mailto:`, `tel:` and `data:` links
/// 3. Reject fragment-only links (same page anchors)
/// 4. Join with the base URL
/// 5. Drop the fragment so `page#comments` and `page` are one URL
/// 6. Accept only HTTP and HTTPS results
///
/// # Examples
///
/// ```
/// use article_harvester::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.idnes.cz/zpravy/domaci").unwrap();
/// let url = resolve_link("../sport#top", &base).unwrap();
/// assert_eq!(url.as_str(), "https://www.idnes.cz/sport");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> UrlResult<Url> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::Unresolvable("empty href".to_string()));
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return Err(UrlError::InvalidScheme(href.to_string()));
    }

    if href.starts_with('#') {
        return Err(UrlError::Unresolvable(format!(
            "fragment-only link {}",
            href
        )));
    }

    let mut absolute = base_url
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    absolute.set_fragment(None);

    match absolute.scheme() {
        "http" | "https" => Ok(absolute),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}
