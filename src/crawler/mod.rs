//! Crawl driver: fetching, session orchestration, and reporting

mod driver;
mod fetcher;
mod report;

pub use driver::{Session, SessionState};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use report::{print_report, SessionReport};

use crate::config::Config;
use crate::Result;

/// Runs one complete harvest session over the configured site
///
/// Convenience wrapper for callers that do not need to hold the [`Session`]
/// themselves; the session still drains cleanly when `shutdown` resolves.
pub async fn harvest(
    config: Config,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<SessionReport> {
    let mut session = Session::new(config)?;
    session.run(shutdown).await
}
