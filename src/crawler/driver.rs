//! Session driver - main harvest orchestration logic
//!
//! One [`Session`] is one run of the crawl from `Idle` to `Closed`:
//! - loads the visited-URL baseline (fatal if unreadable)
//! - seeds the frontier, filtered through the domain allow-list only
//! - fetches up to the configured number of pages concurrently; each
//!   completion is classified, extracted, and its links filtered into the
//!   frontier on the driver task, so session state never sees a concurrent
//!   mutation
//! - on frontier exhaustion or an external shutdown signal, drains through
//!   one idempotent finalize that flushes the visited set and the article
//!   store exactly once

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::report::SessionReport;
use crate::page::{
    classify_page, extract_article, extract_list_links, extract_outbound_links,
    resolve_candidate, PageMarkers, PageKind,
};
use crate::record::ArticleRecord;
use crate::store::{ArticleStore, VisitedStore};
use crate::url::{classify_link, extract_domain, in_allowed_domains};
use crate::ClipperError;
use chrono::Utc;
use reqwest::Client;
use scraper::Html;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::future::Future;
use tokio::task::JoinSet;
use url::Url;

/// Lifecycle state of a harvest session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, frontier not yet seeded
    Idle,
    /// Fetch loop active
    Running,
    /// Flushing stores; no further fetch or enqueue permitted
    Draining,
    /// Terminal
    Closed,
}

/// One harvest session over a configured site
pub struct Session {
    config: Config,
    client: Client,
    markers: PageMarkers,
    baseline: VisitedStore,
    articles: ArticleStore,
    state: SessionState,

    /// Discovered-but-not-fetched URLs, in discovery order
    frontier: VecDeque<Url>,
    /// Everything ever enqueued this session (prevents duplicate enqueue)
    queued: HashSet<String>,
    /// URLs claimed at dequeue time (prevents two in-flight fetches of one URL)
    claimed: HashSet<String>,
    /// Successfully processed URLs in processing order; flushed at session end
    visited: Vec<String>,
    visited_set: HashSet<String>,
    /// Staged article records keyed by URL; merged at session end
    staged: BTreeMap<String, ArticleRecord>,

    report: SessionReport,
    final_report: Option<SessionReport>,
}

impl Session {
    /// Creates a session: loads the baseline, compiles markers, builds the client
    ///
    /// Failure to load the visited baseline is fatal here - the crawl cannot
    /// safely start without its deduplication state.
    pub fn new(config: Config) -> Result<Self, ClipperError> {
        let baseline = VisitedStore::load(config.storage.visited_path.as_ref())?;
        tracing::info!("Loaded visited baseline: {} URLs", baseline.len());

        let articles = ArticleStore::new(config.storage.articles_path.as_ref());
        let markers = PageMarkers::compile(&config.markers)?;
        let client = build_http_client(&config.crawler)?;

        Ok(Self {
            config,
            client,
            markers,
            baseline,
            articles,
            state: SessionState::Idle,
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            claimed: HashSet::new(),
            visited: Vec::new(),
            visited_set: HashSet::new(),
            staged: BTreeMap::new(),
            report: SessionReport::default(),
            final_report: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the session to completion
    ///
    /// `shutdown` interrupts the fetch loop promptly when it resolves; both
    /// that path and normal frontier exhaustion drain through
    /// [`Session::finalize`], so staged results are never lost to a signal.
    pub async fn run(
        &mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<SessionReport, ClipperError> {
        if self.state != SessionState::Idle {
            return Err(ClipperError::SessionClosed);
        }

        self.enqueue_seeds();
        self.state = SessionState::Running;
        tracing::info!(
            "Session running: {} seed URLs in frontier",
            self.frontier.len()
        );

        let limit = self.config.crawler.max_concurrent_fetches as usize;
        let mut inflight: JoinSet<(Url, FetchResult)> = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            // Keep the in-flight set full. Claiming happens here, at dequeue
            // time, so one URL can never be fetched twice concurrently.
            while inflight.len() < limit {
                let Some(url) = self.claim_next() else { break };
                let client = self.client.clone();
                inflight.spawn(async move {
                    let result = fetch_url(&client, url.as_str()).await;
                    (url, result)
                });
            }

            if inflight.is_empty() {
                tracing::info!("Frontier is empty, session complete");
                break;
            }

            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, draining session");
                    self.report.interrupted = true;
                    inflight.abort_all();
                    break;
                }

                joined = inflight.join_next() => {
                    match joined {
                        Some(Ok((url, result))) => self.process_fetch(&url, result),
                        Some(Err(e)) if e.is_panic() => {
                            tracing::error!("Fetch task panicked: {}", e);
                        }
                        _ => {}
                    }
                }
            }
        }

        self.finalize()
    }

    /// Flushes session state to the durable stores, exactly once
    ///
    /// Idempotent: a second call returns the cached report without touching
    /// the stores again. On a store error the staged data is dumped to a
    /// recovery file before the error propagates - the run must not pretend
    /// success, but it must not silently discard results either.
    pub fn finalize(&mut self) -> Result<SessionReport, ClipperError> {
        if let Some(report) = &self.final_report {
            return Ok(report.clone());
        }

        self.state = SessionState::Draining;
        tracing::info!(
            "Draining: flushing {} visited URLs and {} staged articles",
            self.visited.len(),
            self.staged.len()
        );

        match self.baseline.flush(&self.visited) {
            Ok(appended) => self.report.visited_flushed = appended as u64,
            Err(e) => {
                self.dump_staged();
                return Err(e.into());
            }
        }

        match self.articles.merge(&self.staged) {
            Ok(total) => self.report.store_size = total as u64,
            Err(e) => {
                self.dump_staged();
                return Err(e.into());
            }
        }

        self.state = SessionState::Closed;
        let report = self.report.clone();
        self.final_report = Some(report.clone());
        Ok(report)
    }

    /// Seeds the frontier; seeds pass the domain allow-list but bypass
    /// article-link classification
    fn enqueue_seeds(&mut self) {
        let seeds = self.config.site.seeds.clone();
        for seed in &seeds {
            let url = match Url::parse(seed) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!("Skipping unparsable seed '{}': {}", seed, e);
                    continue;
                }
            };

            if !self.domain_allowed(&url) {
                tracing::warn!("Skipping seed outside allowed domains: {}", seed);
                continue;
            }

            if self.baseline.contains(url.as_str()) {
                tracing::debug!("Seed already visited in a prior session: {}", seed);
                continue;
            }

            if self.queued.insert(url.as_str().to_string()) {
                self.frontier.push_back(url);
            }
        }
    }

    /// Pops the next unclaimed frontier URL and claims it
    fn claim_next(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop_front() {
            if self.claimed.insert(url.as_str().to_string()) {
                return Some(url);
            }
        }
        None
    }

    /// Handles one completed fetch: classify, extract, stage, widen frontier
    ///
    /// Runs on the driver task with no awaits, so mutation of session state
    /// is serialized across concurrently completing fetches.
    fn process_fetch(&mut self, url: &Url, result: FetchResult) {
        match result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                self.report.pages_fetched += 1;

                // Relative links resolve against the post-redirect URL, and
                // extracted records carry it too: a redirected article page
                // is stored under its canonical URL.
                let base = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                self.process_page(url, &base, &body);

                // Mark processed; flushed into the durable set at finalize.
                // Both the requested and the post-redirect URL count, so
                // neither side of a redirect gets refetched later.
                self.mark_visited(url.as_str());
                self.mark_visited(base.as_str());
            }
            FetchResult::NotHtml { content_type } => {
                tracing::debug!("Skipping non-HTML page {} ({})", url, content_type);
                self.report.pages_failed += 1;
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} fetching {}, leaving retryable", status_code, url);
                self.report.pages_failed += 1;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Network error fetching {}: {}", url, error);
                self.report.pages_failed += 1;
            }
        }
    }

    fn mark_visited(&mut self, url: &str) {
        if self.visited_set.insert(url.to_string()) {
            self.visited.push(url.to_string());
        }
    }

    fn process_page(&mut self, url: &Url, base: &Url, body: &str) {
        let html = Html::parse_document(body);
        let kind = classify_page(&html, &self.markers);
        tracing::debug!("Classified {} as {:?}", url, kind);

        let mut candidates: Vec<Url> = Vec::new();

        match kind {
            PageKind::Article => {
                let record = extract_article(&html, base.as_str(), Utc::now());
                tracing::info!(
                    "Extracted article {} ({:?})",
                    base,
                    record.headline.as_deref().unwrap_or("<no headline>")
                );
                self.staged.insert(record.url.clone(), record);
                self.report.articles_extracted += 1;
            }
            PageKind::List => {
                for href in extract_list_links(&html, &self.markers) {
                    if let Some(resolved) = resolve_candidate(&href, base) {
                        candidates.push(resolved);
                    }
                }
            }
            PageKind::Unknown => {}
        }

        // Every page widens the frontier through its plain anchors too
        candidates.extend(extract_outbound_links(&html, base));

        for candidate in candidates {
            if self.enqueue_candidate(candidate) {
                self.report.links_enqueued += 1;
            } else {
                self.report.links_skipped += 1;
            }
        }
    }

    /// Applies the frontier filters to one discovered URL
    ///
    /// Order: domain allow-list, article-link classification, durable
    /// baseline, session claims, already-queued.
    fn enqueue_candidate(&mut self, url: Url) -> bool {
        if !self.domain_allowed(&url) {
            return false;
        }

        if !classify_link(url.as_str(), &self.config.site.article_link_rules).is_article() {
            return false;
        }

        if self.baseline.contains(url.as_str()) {
            return false;
        }

        if self.claimed.contains(url.as_str()) {
            return false;
        }

        if !self.queued.insert(url.as_str().to_string()) {
            return false;
        }

        self.frontier.push_back(url);
        true
    }

    fn domain_allowed(&self, url: &Url) -> bool {
        extract_domain(url)
            .map(|d| in_allowed_domains(&d, &self.config.site.allowed_domains))
            .unwrap_or(false)
    }

    /// Best-effort dump of staged state next to the article store for
    /// post-mortem diagnosis after a failed flush
    fn dump_staged(&self) {
        #[derive(serde::Serialize)]
        struct Recovery<'a> {
            visited: &'a [String],
            articles: &'a BTreeMap<String, ArticleRecord>,
        }

        let path = format!("{}.recovery", self.config.storage.articles_path);
        let recovery = Recovery {
            visited: &self.visited,
            articles: &self.staged,
        };

        match serde_json::to_string_pretty(&recovery)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .and_then(|json| std::fs::write(&path, json))
        {
            Ok(()) => tracing::error!(
                "Store flush failed; staged session state dumped to {}",
                path
            ),
            Err(e) => tracing::error!(
                "Store flush failed AND recovery dump to {} failed: {}",
                path,
                e
            ),
        }
    }
}
