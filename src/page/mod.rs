//! Page classification and structured extraction
//!
//! A fetched page is classified once into a closed [`PageKind`] and then
//! consumed exhaustively by the extractor: article pages yield an
//! [`crate::record::ArticleRecord`], list pages yield candidate links.

mod classify;
mod extract;

pub use classify::{classify_page, PageMarkers};
pub use extract::{
    extract_article, extract_list_links, extract_outbound_links, resolve_candidate,
};

/// The kind of a fetched page, decided once by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Page carries the article content marker
    Article,
    /// Page carries the list marker (index/category page)
    List,
    /// Neither marker present; only outbound links are harvested
    Unknown,
}
