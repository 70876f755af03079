//! URL scope handling for Sitecomb
//!
//! A crawl is confined to the seed URL's host; this module provides the
//! scope predicate and host extraction used by the frontier.

use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitecomb::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `url` belongs to the crawl scope anchored at `scope_host`
///
/// In scope means: same host as the seed (case-insensitive, port ignored)
/// and an http or https scheme. Out-of-scope URLs are silently dropped by
/// the frontier; they are not errors.
pub fn in_scope(url: &Url, scope_host: &str) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }
    match extract_host(url) {
        Some(host) => host == scope_host,
        None => false,
    }
}
