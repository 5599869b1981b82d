use super::types::ServiceAccountKey;
use crate::error::GapError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

pub const WEBMASTERS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/webmasters.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// OAuth2 service-account flow: a signed JWT exchanged for a bearer token
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    scope: String,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scope: &str, http: reqwest::Client) -> Result<Self, GapError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| GapError::Auth(format!("invalid private key: {}", e)))?;

        Ok(Self {
            client_email: key.client_email,
            token_uri: key.token_uri,
            encoding_key,
            scope: scope.to_string(),
            http,
            cached: Mutex::new(None),
        })
    }

    /// Load a service-account JSON key from disk
    pub fn from_file(path: &Path, scope: &str, http: reqwest::Client) -> Result<Self, GapError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GapError::Auth(format!("cannot read {}: {}", path.display(), e)))?;
        let key: ServiceAccountKey = serde_json::from_str(&content)
            .map_err(|e| GapError::Auth(format!("cannot parse {}: {}", path.display(), e)))?;

        Self::new(key, scope, http)
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Signed assertion sent to the token endpoint
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, GapError> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: &self.scope,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| GapError::Auth(format!("cannot sign assertion: {}", e)))
    }

    /// Current bearer token, exchanging a fresh assertion when needed
    pub async fn access_token(&self) -> Result<String, GapError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at > now {
                return Ok(token.value.clone());
            }
        }

        debug!(client_email = %self.client_email, "requesting access token");
        let assertion = self.assertion(now)?;
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| GapError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GapError::Auth(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GapError::Auth(format!("invalid token response: {}", e)))?;

        let lifetime = (token.expires_in - EXPIRY_MARGIN_SECS).max(0);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: now + Duration::seconds(lifetime),
        });

        Ok(token.access_token)
    }
}
