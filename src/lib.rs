pub mod analyzer;
pub mod args;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod search_console;
pub mod summary;
pub mod types;

pub use analyzer::{AnalyzerConfig, GapAnalyzer, RunOutcome};
pub use error::{FetchError, GapError};
pub use matcher::{match_keywords, match_page};
pub use normalize::normalize;
pub use summary::aggregate;
pub use types::{KeywordRecord, MatchResult, SummaryRow, UrlReport};
