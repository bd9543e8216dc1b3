//! The harvested article record and its on-disk representation.
//!
//! Field names in the serialized form (`accessing-date`, `last-modification`)
//! match the layout consumed by the downstream article-generation pipeline,
//! so they are renamed rather than changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One harvested article, keyed by its URL in the Article Store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The page URL; unique key within the Article Store
    pub url: String,

    /// When the harvester extracted this record (UTC)
    #[serde(rename = "accessing-date")]
    pub accessed_at: DateTime<Utc>,

    /// Site-reported publication/modification time, if the page carried one
    #[serde(rename = "last-modification")]
    pub last_modified: Option<String>,

    /// First `<h1>` text, if present
    pub headline: Option<String>,

    /// First `<h2>` text, if present
    pub subheadline: Option<String>,

    /// All `<p>` text joined with blank lines
    pub paragraphs: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ArticleRecord {
        ArticleRecord {
            url: "https://news.example/post/1".to_string(),
            accessed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            last_modified: Some("2024-04-30T09:00:00+00:00".to_string()),
            headline: Some("H".to_string()),
            subheadline: None,
            paragraphs: "P1\n\nP2".to_string(),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"accessing-date\""));
        assert!(json.contains("\"last-modification\""));
        assert!(json.contains("\"headline\""));
        assert!(!json.contains("accessed_at"));
    }

    #[test]
    fn test_missing_subheadline_is_null() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"subheadline\":null"));
    }

    #[test]
    fn test_roundtrip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
