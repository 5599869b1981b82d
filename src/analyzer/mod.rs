pub mod engine;
pub mod types;

pub use engine::{GapAnalyzer, RunOutcome};
pub use types::{AnalyzerConfig, SkippedUrl};
