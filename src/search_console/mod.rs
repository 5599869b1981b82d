pub mod auth;
pub mod client;
pub mod json_source;
pub mod trait_def;
pub mod types;

pub use auth::ServiceAccountAuth;
pub use client::{SearchConsoleClient, SearchConsoleConfig};
pub use json_source::JsonKeywordSource;
pub use trait_def::KeywordSource;
pub use types::DateRange;
