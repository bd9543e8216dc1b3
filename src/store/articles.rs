use crate::record::ArticleRecord;
use crate::store::{corrupt_err, io_err, write_json_atomic, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Durable mapping from URL to harvested article record
///
/// On disk it is a single JSON object keyed by URL. Sessions stage records in
/// memory and [`ArticleStore::merge`] folds them in at session end: existing
/// entries for the same URL are overwritten, everything else is preserved, so
/// merging the same batch twice is a no-op.
#[derive(Debug)]
pub struct ArticleStore {
    path: PathBuf,
}

impl ArticleStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Reads the durable mapping; a missing file yields an empty map
    pub fn load(&self) -> StoreResult<BTreeMap<String, ArticleRecord>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| corrupt_err(&self.path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(io_err(&self.path, e)),
        }
    }

    /// Merges the session's staged records into the durable mapping
    ///
    /// Reads the current mapping (initializing an empty one if the file does
    /// not exist yet), upserts every staged record keyed by URL, and rewrites
    /// the file atomically. Idempotent. Returns the total number of records
    /// after the merge.
    pub fn merge(&self, new_records: &BTreeMap<String, ArticleRecord>) -> StoreResult<usize> {
        let mut existing = self.load()?;

        for (url, record) in new_records {
            existing.insert(url.clone(), record.clone());
        }

        write_json_atomic(&self.path, &existing)?;

        Ok(existing.len())
    }
}
