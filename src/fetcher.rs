use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/103.0.0.0 Safari/537.36";

/// Page fetcher trait
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
}

impl HttpFetcher {
    /// `max_retries = 0` sends each request exactly once.
    pub fn new(timeout_secs: u64, max_retries: u32) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request(format!("cannot build http client: {}", e)))?;

        Ok(Self { client, max_retries })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }

    /// Request with exponential backoff between attempts
    async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => {
                    debug!(url, bytes = body.len(), "page fetched");
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    let wait_time = Duration::from_secs(2u64.pow(attempt - 1));
                    warn!(url, attempt, error = %e, "fetch failed, retrying in {:?}", wait_time);
                    tokio::time::sleep(wait_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_with_retry(url).await
    }
}
