use super::auth::{ServiceAccountAuth, WEBMASTERS_READONLY_SCOPE};
use super::trait_def::KeywordSource;
use super::types::{DateRange, SearchAnalyticsRequest, SearchAnalyticsResponse};
use crate::error::GapError;
use crate::types::KeywordRecord;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_API_BASE: &str = "https://searchconsole.googleapis.com";
/// Search Console caps one query at this many rows
pub const MAX_ROW_LIMIT: u32 = 1000;

/// Client settings
#[derive(Debug, Clone)]
pub struct SearchConsoleConfig {
    pub api_base: String,
    pub row_limit: u32,
    pub timeout_secs: u64,
    /// Queries per second across all tasks
    pub queries_per_second: u32,
}

impl Default for SearchConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            row_limit: MAX_ROW_LIMIT,
            timeout_secs: 30,
            queries_per_second: 5,
        }
    }
}

/// Search Console searchAnalytics client for one property
pub struct SearchConsoleClient {
    http: reqwest::Client,
    auth: ServiceAccountAuth,
    site_url: String,
    config: SearchConsoleConfig,
    limiter: DefaultDirectRateLimiter,
}

impl SearchConsoleClient {
    pub fn new(auth: ServiceAccountAuth, http: reqwest::Client, site_url: &str, config: SearchConsoleConfig) -> Self {
        let per_second = NonZeroU32::new(config.queries_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_second(per_second));

        Self {
            http,
            auth,
            site_url: site_url.to_string(),
            config,
            limiter,
        }
    }

    /// Authenticate with a service-account key file
    pub fn from_service_account_file(
        credentials: &Path,
        site_url: &str,
        config: SearchConsoleConfig,
    ) -> Result<Self, GapError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GapError::Auth(format!("cannot build http client: {}", e)))?;
        let auth = ServiceAccountAuth::from_file(credentials, WEBMASTERS_READONLY_SCOPE, http.clone())?;

        info!(site_url, client_email = auth.client_email(), "search console client ready");
        Ok(Self::new(auth, http, site_url, config))
    }

    fn query_url(&self) -> String {
        format!(
            "{}/webmasters/v3/sites/{}/searchAnalytics/query",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.site_url)
        )
    }

    /// Raw searchAnalytics.query call
    pub async fn query(&self, url: &str, range: &DateRange) -> Result<SearchAnalyticsResponse, GapError> {
        let fail = |reason: String| GapError::SourceQuery {
            url: url.to_string(),
            reason,
        };

        let token = self.auth.access_token().await.map_err(|e| fail(e.to_string()))?;
        let body = SearchAnalyticsRequest::queries_for_page(url, range, self.config.row_limit.min(MAX_ROW_LIMIT));

        self.limiter.until_ready().await;
        debug!(url, start = %range.start, end = %range.end, "querying search analytics");

        let response = self
            .http
            .post(self.query_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| fail(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(fail(format!("HTTP {}: {}", status, detail.trim())));
        }

        response
            .json::<SearchAnalyticsResponse>()
            .await
            .map_err(|e| fail(format!("invalid response: {}", e)))
    }
}

#[async_trait::async_trait]
impl KeywordSource for SearchConsoleClient {
    fn name(&self) -> &str {
        "search-console"
    }

    async fn fetch_keywords(&self, url: &str, range: &DateRange) -> Result<Vec<KeywordRecord>, GapError> {
        let records = self.query(url, range).await?.into_records();
        debug!(url, count = records.len(), "keywords received");
        Ok(records)
    }
}
