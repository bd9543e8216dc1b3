use crate::config::MarkerConfig;
use crate::page::PageKind;
use crate::ClipperError;
use scraper::{Html, Selector};

/// Compiled class-attribute selectors for the configured page markers
///
/// Markers match on the *exact* class attribute value, not on individual
/// class names, so `entry-content` does not match a block whose attribute is
/// `entry-content entry clearfix`.
#[derive(Debug, Clone)]
pub struct PageMarkers {
    article: Selector,
    list: Selector,
}

impl PageMarkers {
    /// Compiles the configured marker strings into attribute selectors
    ///
    /// Fails if a marker cannot be expressed as a CSS attribute selector
    /// (e.g. it contains a double quote).
    pub fn compile(config: &MarkerConfig) -> Result<Self, ClipperError> {
        Ok(Self {
            article: marker_selector(&config.article)?,
            list: marker_selector(&config.list)?,
        })
    }

    /// Selector matching blocks whose class attribute equals the list marker
    pub fn list_selector(&self) -> &Selector {
        &self.list
    }
}

fn marker_selector(marker: &str) -> Result<Selector, ClipperError> {
    Selector::parse(&format!("[class=\"{}\"]", marker)).map_err(|e| ClipperError::InvalidMarker {
        marker: marker.to_string(),
        message: format!("{:?}", e),
    })
}

/// Classifies a parsed page by its content markers
///
/// The article marker is checked first: a malformed page carrying both
/// markers classifies as an article. That precedence mirrors the source
/// site's markup, where article pages can also contain list blocks; revisit
/// against live markup before changing it.
pub fn classify_page(html: &Html, markers: &PageMarkers) -> PageKind {
    if html.select(&markers.article).next().is_some() {
        PageKind::Article
    } else if html.select(&markers.list).next().is_some() {
        PageKind::List
    } else {
        PageKind::Unknown
    }
}
