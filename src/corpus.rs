//! Corpus projection for downstream text consumers
//!
//! The article store keys records by URL and carries access timestamps for
//! the harvester's own bookkeeping. Text-side consumers only want the prose,
//! so the corpus view deliberately withholds the URL and both timestamps.

use crate::record::ArticleRecord;
use crate::store::{write_json_atomic, ArticleStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An article reduced to its prose fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusArticle {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub paragraphs: String,
}

impl From<&ArticleRecord> for CorpusArticle {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            headline: record.headline.clone(),
            subheadline: record.subheadline.clone(),
            paragraphs: record.paragraphs.clone(),
        }
    }
}

/// Loads the article store and projects it into corpus articles
///
/// Order follows the store's key order (URL-sorted), so repeated exports of
/// an unchanged store are byte-identical.
pub fn load_corpus(articles_path: &Path) -> StoreResult<Vec<CorpusArticle>> {
    let store = ArticleStore::new(articles_path);
    let records = store.load()?;

    Ok(records.values().map(CorpusArticle::from).collect())
}

/// Exports the corpus projection as a JSON array
pub fn export_corpus(articles_path: &Path, out_path: &Path) -> StoreResult<usize> {
    let corpus = load_corpus(articles_path)?;
    write_json_atomic(out_path, &corpus)?;
    Ok(corpus.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn record(url: &str, headline: &str) -> ArticleRecord {
        ArticleRecord {
            url: url.to_string(),
            accessed_at: Utc::now(),
            last_modified: Some("2024-04-30T09:00:00+00:00".to_string()),
            headline: Some(headline.to_string()),
            subheadline: None,
            paragraphs: "Body text.".to_string(),
        }
    }

    fn seeded_store(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("articles.json");
        let store = ArticleStore::new(&path);
        let mut records = BTreeMap::new();
        records.insert(
            "https://news.example/post/2".to_string(),
            record("https://news.example/post/2", "Second"),
        );
        records.insert(
            "https://news.example/post/1".to_string(),
            record("https://news.example/post/1", "First"),
        );
        store.merge(&records).unwrap();
        path
    }

    #[test]
    fn test_load_corpus_projects_prose_only() {
        let dir = TempDir::new().unwrap();
        let path = seeded_store(&dir);

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        // URL-sorted store keys
        assert_eq!(corpus[0].headline.as_deref(), Some("First"));
        assert_eq!(corpus[1].headline.as_deref(), Some("Second"));

        let json = serde_json::to_string(&corpus[0]).unwrap();
        assert!(!json.contains("url"));
        assert!(!json.contains("accessing-date"));
        assert!(!json.contains("last-modification"));
    }

    #[test]
    fn test_load_corpus_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let corpus = load_corpus(&dir.path().join("absent.json")).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_export_corpus_writes_json_array() {
        let dir = TempDir::new().unwrap();
        let path = seeded_store(&dir);
        let out = dir.path().join("corpus.json");

        let count = export_corpus(&path, &out).unwrap();
        assert_eq!(count, 2);

        let exported: Vec<CorpusArticle> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].paragraphs, "Body text.");
    }
}
