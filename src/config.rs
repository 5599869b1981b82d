//! Runtime configuration.
//!
//! Values come from environment variables with defaults for the
//! modelosyformularios.es property; CLI flags override them in `main`.

use crate::error::GapError;
use crate::search_console::client::DEFAULT_API_BASE;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_CREDENTIALS_FILE: &str = "GAP_CREDENTIALS_FILE";
pub const ENV_SITE_URL: &str = "GAP_SITE_URL";
pub const ENV_API_BASE: &str = "GAP_API_BASE";
pub const ENV_OUTPUT: &str = "GAP_OUTPUT";
pub const ENV_DAYS: &str = "GAP_DAYS";

const DEFAULT_SITE_URL: &str = "sc-domain:modelosyformularios.es";
const DEFAULT_OUTPUT: &str = "results.xlsx";
const DEFAULT_DAYS: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    credentials_file: Option<PathBuf>,
    site_url: String,
    api_base: String,
    output: PathBuf,
    days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_file: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            days: DEFAULT_DAYS,
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, GapError> {
        let defaults = Self::default();

        let days = match env::var(ENV_DAYS) {
            Ok(raw) => parse_days(&raw)?,
            Err(_) => defaults.days,
        };

        Ok(Self {
            credentials_file: env::var(ENV_CREDENTIALS_FILE).ok().map(PathBuf::from),
            site_url: env::var(ENV_SITE_URL).unwrap_or(defaults.site_url),
            api_base: env::var(ENV_API_BASE).unwrap_or(defaults.api_base),
            output: env::var(ENV_OUTPUT).map(PathBuf::from).unwrap_or(defaults.output),
            days,
        })
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_days(mut self, days: u32) -> Result<Self, GapError> {
        if days == 0 {
            return Err(invalid_days("must be at least 1"));
        }
        self.days = days;
        Ok(self)
    }

    /// Service-account key file; required for live queries
    pub fn credentials_file(&self) -> Result<&Path, GapError> {
        self.credentials_file.as_deref().ok_or_else(|| GapError::Config {
            field: "credentials_file",
            reason: format!("set {} or pass --credentials", ENV_CREDENTIALS_FILE),
        })
    }

    /// Search Console property, e.g. `sc-domain:example.com`
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Length of the query date range ending today
    pub fn days(&self) -> u32 {
        self.days
    }
}

fn parse_days(raw: &str) -> Result<u32, GapError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(invalid_days("must be at least 1")),
        Ok(days) => Ok(days),
        Err(e) => Err(invalid_days(&format!("{:?}: {}", raw, e))),
    }
}

fn invalid_days(reason: &str) -> GapError {
    GapError::Config {
        field: "days",
        reason: reason.to_string(),
    }
}
