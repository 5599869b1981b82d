use super::trait_def::KeywordSource;
use super::types::DateRange;
use crate::error::GapError;
use crate::types::KeywordRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Keyword file layout: one list for every URL, or a list per URL
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeywordFile {
    Shared(Vec<KeywordRecord>),
    PerUrl(HashMap<String, Vec<KeywordRecord>>),
}

/// Offline keyword source backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonKeywordSource {
    keywords: KeywordFile,
}

impl JsonKeywordSource {
    /// Same keyword list for every URL
    pub fn shared(records: Vec<KeywordRecord>) -> Self {
        Self {
            keywords: KeywordFile::Shared(records),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, GapError> {
        let keywords = serde_json::from_str(content).map_err(|e| GapError::Config {
            field: "keywords",
            reason: e.to_string(),
        })?;
        Ok(Self { keywords })
    }

    pub fn from_file(path: &Path) -> Result<Self, GapError> {
        let content = std::fs::read_to_string(path).map_err(|e| GapError::Config {
            field: "keywords",
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&content)
    }
}

#[async_trait::async_trait]
impl KeywordSource for JsonKeywordSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch_keywords(&self, url: &str, _range: &DateRange) -> Result<Vec<KeywordRecord>, GapError> {
        match &self.keywords {
            KeywordFile::Shared(records) => Ok(records.clone()),
            KeywordFile::PerUrl(by_url) => by_url.get(url).cloned().ok_or_else(|| GapError::SourceQuery {
                url: url.to_string(),
                reason: "no keywords listed for this URL".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_list() {
        let source = JsonKeywordSource::from_json(
            r#"[{"keyword": "Modelo 002", "clicks": 10, "impressions": 100}]"#,
        )
        .unwrap();

        let records = source.fetch_keywords("https://a.es/x", &DateRange::default()).await.unwrap();
        assert_eq!(records, vec![KeywordRecord::new("Modelo 002", 10, 100)]);

        let records = source.fetch_keywords("https://b.es/y", &DateRange::default()).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_per_url_list() {
        let source = JsonKeywordSource::from_json(
            r#"{"https://a.es/x": [{"keyword": "iva", "clicks": 1, "impressions": 2}]}"#,
        )
        .unwrap();

        let records = source.fetch_keywords("https://a.es/x", &DateRange::default()).await.unwrap();
        assert_eq!(records, vec![KeywordRecord::new("iva", 1, 2)]);

        let missing = source.fetch_keywords("https://b.es/y", &DateRange::default()).await;
        assert!(matches!(missing, Err(GapError::SourceQuery { .. })));
    }

    #[test]
    fn test_rejects_malformed_file() {
        let result = JsonKeywordSource::from_json(r#"[{"keyword": "x"}]"#);
        assert!(matches!(result, Err(GapError::Config { field: "keywords", .. })));
    }
}
