//! HTML collaborator boundary: title, rendered text, and hyperlinks
//!
//! The crawl engine consumes HTML solely through this module: give it a
//! document and a base URL, get back the page title, the plain text the
//! extractors run over, and the absolute in-page links.

use scraper::{Html, Selector};
use url::Url;

/// Extracted view of one HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Raw `<title>` text, if present and non-empty
    pub title: Option<String>,

    /// Newline-joined text content of the document
    pub text: String,

    /// Absolute URLs from `<a href>` tags; scope filtering happens later
    pub links: Vec<Url>,
}

/// Parses an HTML document into title, plain text, and links
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_text(document: &Html) -> String {
    // Newline-separated so text from adjacent elements cannot run
    // together into one line; the extractors treat lines as units.
    document.root_element().text().collect::<Vec<_>>().join("\n")
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves an href against the base URL
///
/// Returns None for hrefs that can never be crawl targets: special
/// schemes, fragment-only anchors, empty or unparsable values.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}
