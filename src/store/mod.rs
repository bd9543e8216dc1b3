//! Durable state stores
//!
//! Two JSON files survive between harvest sessions: the visited-URL array and
//! the URL -> article-record object. Both are read fully at session start and
//! rewritten fully at session end; the rewrite goes through a temp file in the
//! same directory followed by a rename, so a crash mid-flush leaves the
//! previous file intact.

mod articles;
mod visited;

pub use articles::ArticleStore;
pub use visited::VisitedStore;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing the durable stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt store file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn corrupt_err(path: &Path, source: serde_json::Error) -> StoreError {
    StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    }
}

/// Serializes a value as pretty JSON and atomically replaces `path` with it
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| corrupt_err(path, e))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_atomic_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_json_atomic(&path, &vec!["a", "b"]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }

    #[test]
    fn test_write_json_atomic_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_json_atomic(&path, &vec!["a"]).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.json")]);
    }

    #[test]
    fn test_write_json_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_json_atomic(&path, &vec!["old"]).unwrap();
        write_json_atomic(&path, &vec!["new"]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("new"));
        assert!(!content.contains("old"));
    }
}
