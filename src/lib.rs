//! Clipper: an incremental news-article harvester
//!
//! This crate crawls a single news site, classifies pages, extracts structured
//! article records, and keeps a durable visited-URL set so repeated runs never
//! reprocess content they already harvested.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod page;
pub mod record;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for clipper operations
#[derive(Debug, Error)]
pub enum ClipperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid page marker '{marker}': {message}")]
    InvalidMarker { marker: String, message: String },

    #[error("Session already closed")]
    SessionClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for clipper operations
pub type Result<T> = std::result::Result<T, ClipperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Session, SessionReport, SessionState};
pub use page::PageKind;
pub use record::ArticleRecord;
pub use url::{classify_link, extract_domain, in_allowed_domains, LinkClass};
