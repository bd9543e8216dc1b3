use crate::store::{corrupt_err, io_err, write_json_atomic, StoreResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Durable set of URLs already processed by any prior session
///
/// Loaded read-only at session start; the session accumulates its own
/// additions and [`VisitedStore::flush`] unions them into the file exactly
/// once at session end. On disk it is a JSON array of URL strings, kept in
/// discovery order.
#[derive(Debug)]
pub struct VisitedStore {
    path: PathBuf,
    urls: Vec<String>,
    index: HashSet<String>,
}

impl VisitedStore {
    /// Loads the durable visited set
    ///
    /// A missing file yields an empty baseline (first run). An unreadable or
    /// corrupt file is an error: without the deduplication baseline a crawl
    /// cannot safely start.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let urls: Vec<String> = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| corrupt_err(path, e))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(io_err(path, e)),
        };

        let index = urls.iter().cloned().collect();

        Ok(Self {
            path: path.to_path_buf(),
            urls,
            index,
        })
    }

    /// Membership test against the loaded baseline
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    /// Number of URLs in the baseline
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the baseline is empty
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Unions `new_urls` into the durable set and rewrites the file
    ///
    /// Additions keep their order; URLs already in the baseline are skipped.
    /// The write is atomic: if it never completes, the durable set on disk is
    /// unchanged. Returns the number of URLs actually appended.
    pub fn flush(&self, new_urls: &[String]) -> StoreResult<usize> {
        let mut merged = self.urls.clone();
        let mut seen: HashSet<&str> = self.index.iter().map(String::as_str).collect();

        let mut appended = 0;
        for url in new_urls {
            if seen.insert(url.as_str()) {
                merged.push(url.clone());
                appended += 1;
            }
        }

        write_json_atomic(&self.path, &merged)?;

        Ok(appended)
    }
}
