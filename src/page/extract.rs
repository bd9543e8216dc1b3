//! Structured extraction from classified pages
//!
//! Article pages are read through typed DOM queries (first `<h1>`, first
//! `<h2>`, all `<p>` text, the `article:published_time` meta field). List
//! pages are the one place where structured query is unavailable: candidate
//! blocks carry their "more" link somewhere inside arbitrary markup, so the
//! first `href` is pulled from the block's raw HTML with a regex. That
//! fallback is deliberate, not an oversight.

use crate::page::PageMarkers;
use crate::record::ArticleRecord;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]*)""#).expect("href regex is valid"));

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static PUBLISHED_TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="article:published_time"]"#)
        .expect("published-time selector is valid")
});

/// Extracts an article record from a page classified as an article
///
/// Missing optional pieces (subheadline, published time, even the headline)
/// yield `None`; extraction itself never fails.
pub fn extract_article(html: &Html, url: &str, now: DateTime<Utc>) -> ArticleRecord {
    let headline = first_text(html, "h1");
    let subheadline = first_text(html, "h2");
    let paragraphs = all_text(html, "p").join("\n\n");
    let last_modified = published_time(html);

    ArticleRecord {
        url: url.to_string(),
        accessed_at: now,
        last_modified,
        headline,
        subheadline,
        paragraphs,
    }
}

/// Extracts candidate "more" links from a page classified as a list
///
/// For each block whose class attribute equals the list marker, the first
/// `href` in the block's raw markup is taken as the candidate. Blocks with no
/// href are logged and skipped; they never fail the page. Set semantics
/// deduplicate candidates repeated within one page.
pub fn extract_list_links(html: &Html, markers: &PageMarkers) -> HashSet<String> {
    let mut candidates = HashSet::new();

    for block in html.select(markers.list_selector()) {
        let raw = block.html();
        match HREF_RE.captures(&raw).and_then(|c| c.get(1)) {
            Some(href) => {
                candidates.insert(href.as_str().to_string());
            }
            None => {
                tracing::debug!("List block without an href attribute, skipping");
            }
        }
    }

    candidates
}

/// Extracts all anchor links from a page, resolved to absolute URLs
///
/// Runs on every fetched page regardless of kind so article pages can still
/// widen the frontier through their nav and related-story links.
pub fn extract_outbound_links(html: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    for element in html.select(&ANCHOR_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_candidate(href, base_url) {
                links.push(url);
            }
        }
    }

    links
}

/// Resolves a candidate href against the page URL
///
/// Returns None for hrefs that cannot become fetchable page URLs:
/// javascript:/mailto:/tel:/data: schemes, same-page fragments, malformed
/// URLs, and anything that is not http(s) after resolution.
pub fn resolve_candidate(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(resolved) => {
            if resolved.scheme() == "http" || resolved.scheme() == "https" {
                Some(resolved)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

fn first_text(html: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;

    html.select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn all_text(html: &Html, tag: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };

    html.select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn published_time(html: &Html) -> Option<String> {
    html.select(&PUBLISHED_TIME_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|s| s.to_string())
}
