use crate::parser::{ExtractorConfig, Preset};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "keyword-gap",
    about = "Check which Search Console keywords actually appear in each page's text",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query Search Console for each URL and match its keywords
    Run {
        /// Service-account JSON key (overrides GAP_CREDENTIALS_FILE)
        #[arg(short, long)]
        credentials: Option<PathBuf>,

        /// Search Console property (overrides GAP_SITE_URL)
        #[arg(long)]
        site_url: Option<String>,

        /// Search Console API base URL (overrides GAP_API_BASE)
        #[arg(long)]
        api_base: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Match keywords from a local JSON file instead of Search Console
    Check {
        /// JSON array of {keyword, clicks, impressions}, or an object keyed by URL
        #[arg(short, long)]
        keywords: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Comma-separated URLs (1 to 30); prompted for when omitted
    #[arg(short, long)]
    pub urls: Option<String>,

    /// Output workbook (overrides GAP_OUTPUT)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Days of data ending today (overrides GAP_DAYS)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Page layout to extract text from
    #[arg(long, value_enum, default_value = "modelos")]
    pub preset: Preset,

    /// CSS selector of the content block (overrides the preset)
    #[arg(long)]
    pub container: Option<String>,

    /// CSS selector of the heading (overrides the preset)
    #[arg(long)]
    pub heading: Option<String>,

    /// Ignore the heading, even if the preset has one
    #[arg(long)]
    pub no_heading: bool,

    /// URLs processed at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Page fetch retries
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

impl CommonArgs {
    /// Preset selectors with any CLI overrides applied
    pub fn extractor_config(&self) -> ExtractorConfig {
        let mut config = self.preset.config();
        if let Some(container) = &self.container {
            config.container_selector = container.clone();
        }
        if let Some(heading) = &self.heading {
            config.heading_selector = Some(heading.clone());
        }
        if self.no_heading {
            config.heading_selector = None;
        }
        config
    }
}
