use super::types::DateRange;
use crate::error::GapError;
use crate::types::KeywordRecord;

/// Keyword source trait
#[async_trait::async_trait]
pub trait KeywordSource: Send + Sync {
    /// Source name
    fn name(&self) -> &str;

    /// Keywords reported for pages matching `url` within `range`
    async fn fetch_keywords(&self, url: &str, range: &DateRange) -> Result<Vec<KeywordRecord>, GapError>;
}
