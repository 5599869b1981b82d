use serde::{Deserialize, Serialize};

/// One search query reported for a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// Query text as returned by the source (case-sensitive)
    pub keyword: String,
    pub clicks: u64,
    pub impressions: u64,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, clicks: u64, impressions: u64) -> Self {
        Self {
            keyword: keyword.into(),
            clicks,
            impressions,
        }
    }
}

/// Presence of one keyword in one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Normalized keyword
    pub keyword: String,
    /// "Planteada": the keyword occurs in the page text
    pub present: bool,
    pub clicks: u64,
    pub impressions: u64,
}

/// All match results for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlReport {
    pub url: String,
    /// 1-based position of the URL in the input list
    pub position: usize,
    pub results: Vec<MatchResult>,
}

impl UrlReport {
    pub fn new(url: impl Into<String>, position: usize, results: Vec<MatchResult>) -> Self {
        Self {
            url: url.into(),
            position,
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Per-URL aggregate, split by presence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub url: String,
    pub count_present: u64,
    pub count_absent: u64,
    pub impressions_absent: u64,
    pub clicks_absent: u64,
    pub impressions_present: u64,
    pub clicks_present: u64,
}

impl SummaryRow {
    /// Total number of keywords counted in this row
    pub fn total_keywords(&self) -> u64 {
        self.count_present + self.count_absent
    }
}
