use crate::input::MAX_URLS;

/// Analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// URLs processed at once; 1 keeps the run sequential
    pub concurrency: usize,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
    /// Page fetch retries
    pub max_retries: u32,
    /// Most URLs accepted per run
    pub max_urls: usize,
    /// Draw the progress bar
    pub show_progress: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout_secs: 30,
            max_retries: 0,
            max_urls: MAX_URLS,
            show_progress: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// A URL left out of the report, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub url: String,
    pub position: usize,
    pub reason: String,
}
