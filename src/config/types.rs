use serde::Deserialize;

/// Main configuration structure for clipper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    pub markers: MarkerConfig,
    pub storage: StorageConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// User agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout() -> u64 {
    30
}

/// The site being harvested: where to start and which links count as articles
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Seed URLs to start crawling from
    pub seeds: Vec<String>,

    /// Domains the crawl may touch (subdomains included)
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Literal substrings; a URL containing any of them is an article link
    #[serde(rename = "article-link-rules", default)]
    pub article_link_rules: Vec<String>,
}

/// Class-attribute markers used to classify fetched pages
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    /// Exact class attribute of the article content block
    pub article: String,

    /// Exact class attribute of list-page entry blocks
    pub list: String,
}

/// Paths of the durable state files
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the visited-URL JSON array
    #[serde(rename = "visited-path")]
    pub visited_path: String,

    /// Path to the URL -> article record JSON object
    #[serde(rename = "articles-path")]
    pub articles_path: String,
}
