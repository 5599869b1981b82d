use anyhow::{Context, Result};
use clap::Parser;
use keyword_gap::args::{Cli, Command, CommonArgs};
use keyword_gap::config::Config;
use keyword_gap::fetcher::HttpFetcher;
use keyword_gap::input::parse_url_list;
use keyword_gap::parser::ContentExtractor;
use keyword_gap::search_console::{
    DateRange, JsonKeywordSource, KeywordSource, SearchConsoleClient, SearchConsoleConfig,
};
use keyword_gap::{AnalyzerConfig, GapAnalyzer};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Run {
            credentials,
            site_url,
            api_base,
            common,
        } => run_live(credentials, site_url, api_base, common).await,
        Command::Check { keywords, common } => run_check(keywords, common).await,
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_live(
    credentials: Option<PathBuf>,
    site_url: Option<String>,
    api_base: Option<String>,
    common: CommonArgs,
) -> Result<()> {
    println!("=== Keyword gap: Search Console ===\n");

    let urls = read_urls(&common)?;
    let mut config = apply_common(Config::from_env()?, &common)?;
    if let Some(path) = credentials {
        config = config.with_credentials_file(path);
    }
    if let Some(site_url) = site_url {
        config = config.with_site_url(site_url);
    }
    if let Some(api_base) = api_base {
        config = config.with_api_base(api_base);
    }

    let client = SearchConsoleClient::from_service_account_file(
        config.credentials_file()?,
        config.site_url(),
        SearchConsoleConfig {
            api_base: config.api_base().to_string(),
            timeout_secs: common.timeout,
            ..SearchConsoleConfig::default()
        },
    )
    .context("cannot set up the Search Console client")?;

    println!("⚙️  Settings:");
    println!("  - property: {}", config.site_url());
    analyze(Arc::new(client), urls, &config, &common).await
}

async fn run_check(keywords: PathBuf, common: CommonArgs) -> Result<()> {
    println!("=== Keyword gap: local keyword file ===\n");

    let urls = read_urls(&common)?;
    let config = apply_common(Config::from_env()?, &common)?;
    let source = JsonKeywordSource::from_file(&keywords)
        .with_context(|| format!("cannot load keywords from {}", keywords.display()))?;

    println!("⚙️  Settings:");
    println!("  - keywords: {}", keywords.display());
    analyze(Arc::new(source), urls, &config, &common).await
}

async fn analyze(
    source: Arc<dyn KeywordSource>,
    urls: Vec<String>,
    config: &Config,
    common: &CommonArgs,
) -> Result<()> {
    let range = DateRange::last_days(config.days());
    let analyzer_config = AnalyzerConfig::new()
        .with_concurrency(common.concurrency)
        .with_timeout(common.timeout)
        .with_retries(common.retries);

    println!("  - URLs: {}", urls.len());
    println!("  - dates: {} .. {}", range.start, range.end);
    println!("  - concurrency: {}", analyzer_config.concurrency);
    println!("  - output: {}\n", config.output().display());

    let fetcher = HttpFetcher::new(analyzer_config.timeout_secs, analyzer_config.max_retries)?;
    let extractor = ContentExtractor::new(&common.extractor_config())?;
    let analyzer = GapAnalyzer::new(source, Arc::new(fetcher), extractor, range, analyzer_config);

    let outcome = analyzer.run(&urls).await?;

    outcome.report.print_summary();
    if !outcome.skipped.is_empty() {
        println!("\n⏭️  Skipped URLs:");
        for skipped in &outcome.skipped {
            println!("  [{}] {} - {}", skipped.position, skipped.url, skipped.reason);
        }
    }

    outcome
        .report
        .write_xlsx(config.output())
        .context("cannot write the report")?;
    println!("\n✨ Results exported to {}", config.output().display());

    Ok(())
}

fn apply_common(mut config: Config, common: &CommonArgs) -> Result<Config> {
    if let Some(output) = &common.output {
        config = config.with_output(output);
    }
    if let Some(days) = common.days {
        config = config.with_days(days)?;
    }
    Ok(config)
}

/// URL list from `--urls`, or prompted for on stdin
fn read_urls(common: &CommonArgs) -> Result<Vec<String>> {
    let input = match &common.urls {
        Some(urls) => urls.clone(),
        None => {
            print!("Enter the URLs separated by commas (30 max): ");
            std::io::stdout().flush()?;
            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            input
        }
    };

    Ok(parse_url_list(&input, AnalyzerConfig::default().max_urls)?)
}
