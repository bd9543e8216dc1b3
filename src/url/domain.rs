use url::Url;

/// Extracts the domain from a URL
///
/// Returns the host portion of the URL lowercased, or None if the URL has no
/// host (which should not happen for valid http(s) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use clipper::url::extract_domain;
///
/// let url = Url::parse("https://News.Example/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("news.example".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
