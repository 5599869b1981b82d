use thiserror::Error;

#[derive(Error, Debug)]
pub enum GapError {
    /// Keyword source failed for one URL; the URL is skipped
    #[error("keyword query failed for {url}: {reason}")]
    SourceQuery { url: String, reason: String },

    /// Page could not be downloaded; the URL is skipped
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Bad user input, rejected before any network call
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("report write failed: {0}")]
    Report(String),

    #[error("invalid value for '{field}': {reason}")]
    Config { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("request timeout")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read body: {0}")]
    Body(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
