//! Article field extraction
//!
//! Each field is resolved independently by a small resolver returning
//! `Result<Option<String>, ExtractError>`:
//! - `Ok(Some(_))`: the field was found
//! - `Ok(None)`: the marker is absent, try the next source or fall back to the sentinel
//! - `Err(_)`: the marker is present but malformed; the whole page is rejected
//!
//! Different news sites expose the category through different markup, so
//! category sources form an ordered chain where the first hit wins.

use crate::models::{Article, DEFAULT_COMMENTS, UNKNOWN_CATEGORY, UNKNOWN_DATE, UNKNOWN_TITLE};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

const TITLE_SELECTOR: &str = "h1";
const META_CATEGORY_SELECTOR: &str = r#"meta[name="category"]"#;
const META_ARTICLE_SECTION_SELECTOR: &str = r#"meta[property="article:section"]"#;
const META_SECTION_SELECTOR: &str = r#"meta[name="section"]"#;
const CATEGORY_DIV_SELECTOR: &str = "div.category";
/// Comment counter link on the novinky.cz article template
const COMMENTS_SELECTOR: &str = "a.c_at.c_al.e_dW";
const IMAGE_SELECTOR: &str = "img";
const PARAGRAPH_SELECTOR: &str = "p";
const TIME_SELECTOR: &str = "time";

/// Why a page could not be turned into an [`Article`]
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },

    #[error("element matching {selector} has no `{attribute}` attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },
}

type FieldResult = Result<Option<String>, ExtractError>;

type FieldResolver = fn(&Html) -> FieldResult;

/// Category sources in priority order
const CATEGORY_CHAIN: &[FieldResolver] = &[
    category_from_meta_name,
    category_from_article_section,
    category_from_meta_section,
    category_from_container,
];

/// Builds an article record from a parsed page
///
/// Fields that are absent fall back to their sentinel values. Any malformed
/// marker aborts extraction for the whole page; no partial record is produced.
///
/// # Example
///
/// ```
/// use article_harvester::crawler::{extract_article, parse_document};
///
/// let document = parse_document(r#"<h1> Titulek </h1><p>Text.</p><time datetime="2024-05-01"></time>"#);
/// let article = extract_article("https://www.ctk.cz/zpravy/1", &document).unwrap();
/// assert_eq!(article.title, "Titulek");
/// assert_eq!(article.date, "2024-05-01");
/// ```
pub fn extract_article(url: &str, document: &Html) -> Result<Article, ExtractError> {
    let title = resolve_title(document)?.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let category = first_resolved(document, CATEGORY_CHAIN)?
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    let comments = resolve_comments(document)?.unwrap_or_else(|| DEFAULT_COMMENTS.to_string());
    let images = count_images(document)?;
    let content = collect_content(document)?;
    let date = resolve_date(document)?.unwrap_or_else(|| UNKNOWN_DATE.to_string());

    Ok(Article {
        url: url.to_string(),
        title,
        category,
        comments,
        images,
        content,
        date,
    })
}

/// Parses `html` and extracts an article from it
pub fn extract_article_from_html(url: &str, html: &str) -> Result<Article, ExtractError> {
    extract_article(url, &Html::parse_document(html))
}

/// Runs resolvers in order and returns the first value found
fn first_resolved(document: &Html, resolvers: &[FieldResolver]) -> FieldResult {
    for resolve in resolvers {
        if let Some(value) = resolve(document)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

fn select_first<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, ExtractError> {
    Ok(document.select(&selector(css)?).next())
}

/// Descendant text with every whitespace run collapsed to one space and the
/// edges trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a required attribute from the first match of `css`
///
/// A missing element is `Ok(None)`; an element without the attribute is an error.
fn required_attr(document: &Html, css: &'static str, attribute: &'static str) -> FieldResult {
    match select_first(document, css)? {
        None => Ok(None),
        Some(element) => element
            .value()
            .attr(attribute)
            .map(|value| Some(value.to_string()))
            .ok_or(ExtractError::MissingAttribute {
                selector: css,
                attribute,
            }),
    }
}

fn resolve_title(document: &Html) -> FieldResult {
    Ok(select_first(document, TITLE_SELECTOR)?.map(element_text))
}

fn category_from_meta_name(document: &Html) -> FieldResult {
    required_attr(document, META_CATEGORY_SELECTOR, "content")
}

fn category_from_article_section(document: &Html) -> FieldResult {
    required_attr(document, META_ARTICLE_SECTION_SELECTOR, "content")
}

fn category_from_meta_section(document: &Html) -> FieldResult {
    required_attr(document, META_SECTION_SELECTOR, "content")
}

fn category_from_container(document: &Html) -> FieldResult {
    Ok(select_first(document, CATEGORY_DIV_SELECTOR)?.map(element_text))
}

fn resolve_comments(document: &Html) -> FieldResult {
    Ok(select_first(document, COMMENTS_SELECTOR)?.map(element_text))
}

fn count_images(document: &Html) -> Result<u32, ExtractError> {
    let count = document.select(&selector(IMAGE_SELECTOR)?).count();
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Joins the text of every paragraph with single spaces
///
/// Empty paragraphs still contribute an empty entry, so `<p>A</p><p> </p><p>B</p>`
/// yields `"A  B"`.
fn collect_content(document: &Html) -> Result<String, ExtractError> {
    let paragraph = selector(PARAGRAPH_SELECTOR)?;
    let parts: Vec<String> = document.select(&paragraph).map(element_text).collect();
    Ok(parts.join(" "))
}

fn resolve_date(document: &Html) -> FieldResult {
    required_attr(document, TIME_SELECTOR, "datetime")
}
