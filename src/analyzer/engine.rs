use super::types::{AnalyzerConfig, SkippedUrl};
use crate::error::GapError;
use crate::fetcher::Fetcher;
use crate::matcher::match_keywords;
use crate::parser::ContentExtractor;
use crate::report::ReportBuilder;
use crate::search_console::{DateRange, KeywordSource};
use crate::types::UrlReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub report: ReportBuilder,
    pub skipped: Vec<SkippedUrl>,
}

/// Everything one URL needs; cheap to clone into a task
#[derive(Clone)]
struct UrlPipeline {
    source: Arc<dyn KeywordSource>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<ContentExtractor>,
    range: DateRange,
}

impl UrlPipeline {
    /// Keywords, page, text, matches. An empty report means nothing to match.
    async fn run(&self, position: usize, url: &str) -> Result<UrlReport, GapError> {
        let records = self.source.fetch_keywords(url, &self.range).await?;
        if records.is_empty() {
            warn!(url, source = self.source.name(), "no keywords reported");
            return Ok(UrlReport::new(url, position, Vec::new()));
        }

        let html = self.fetcher.fetch_page(url).await?;
        let extraction = self.extractor.extract(url, &html);
        if extraction.is_empty() {
            warn!(url, "no relevant text extracted");
        }

        let results = match_keywords(&records, &extraction.text);
        info!(
            url,
            keywords = records.len(),
            matched = results.iter().filter(|r| r.present).count(),
            "url analyzed"
        );
        Ok(UrlReport::new(url, position, results))
    }
}

/// Keyword gap analyzer
pub struct GapAnalyzer {
    pipeline: UrlPipeline,
    config: AnalyzerConfig,
}

impl GapAnalyzer {
    pub fn new(
        source: Arc<dyn KeywordSource>,
        fetcher: Arc<dyn Fetcher>,
        extractor: ContentExtractor,
        range: DateRange,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            pipeline: UrlPipeline {
                source,
                fetcher,
                extractor: Arc::new(extractor),
                range,
            },
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a single URL without the skip policy
    pub async fn analyze_url(&self, position: usize, url: &str) -> Result<UrlReport, GapError> {
        self.pipeline.run(position, url).await
    }

    /// Analyze every URL. Failures skip that URL only; reports keep input order.
    pub async fn run(&self, urls: &[String]) -> Result<RunOutcome, GapError> {
        if urls.is_empty() {
            return Err(GapError::Validation("at least one URL is required".to_string()));
        }
        if urls.len() > self.config.max_urls {
            return Err(GapError::Validation(format!(
                "at most {} URLs are allowed, got {}",
                self.config.max_urls,
                urls.len()
            )));
        }

        info!(
            urls = urls.len(),
            concurrency = self.config.concurrency,
            start = %self.pipeline.range.start,
            end = %self.pipeline.range.end,
            "starting keyword gap analysis"
        );

        let progress = self.progress_bar(urls.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            let position = i + 1;
            let url = url.clone();
            let pipeline = self.pipeline.clone();
            let semaphore = Arc::clone(&semaphore);
            let progress = progress.clone();

            let task = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                progress.set_message(url.clone());
                let result = pipeline.run(position, &url).await;
                progress.inc(1);
                result
            });

            tasks.push((position, urls[i].clone(), task));
        }

        let mut outcome = RunOutcome::default();

        for (position, url, task) in tasks {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => {
                    error!(url = %url, error = %e, "url task aborted");
                    outcome.skipped.push(SkippedUrl {
                        url,
                        position,
                        reason: format!("task aborted: {}", e),
                    });
                    continue;
                }
            };

            match result {
                Ok(report) if report.is_empty() => {
                    outcome.skipped.push(SkippedUrl {
                        url,
                        position,
                        reason: "no keywords or no page text to match".to_string(),
                    });
                }
                Ok(report) => outcome.report.add(report),
                Err(e) => {
                    error!(url = %url, error = %e, "skipping url");
                    outcome.skipped.push(SkippedUrl {
                        url,
                        position,
                        reason: e.to_string(),
                    });
                }
            }
        }

        progress.finish_with_message("done");
        info!(
            reported = outcome.report.reports().len(),
            skipped = outcome.skipped.len(),
            "analysis finished"
        );

        Ok(outcome)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} URLs {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb
    }
}
