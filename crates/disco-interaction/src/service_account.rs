//! Google service-account authentication.
//!
//! Implements the OAuth 2.0 JWT bearer grant: a self-signed RS256 assertion
//! is exchanged at the key's `token_uri` for a short-lived access token.

use chrono::{DateTime, Duration, Utc};
use disco_core::config::ServiceAccountKey;
use disco_core::error::StoreError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Issues and caches bearer tokens for one service account.
pub struct ServiceAccountAuth {
    client: Client,
    client_email: String,
    token_uri: String,
    scopes: Vec<String>,
    signing_key: EncodingKey,
    key_id: Option<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Parses the private key up front so a bad key fails at startup.
    pub fn new(
        client: Client,
        key: &ServiceAccountKey,
        scopes: Vec<String>,
    ) -> Result<Self, StoreError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid service account private key: {e}")))?;

        Ok(Self {
            client,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            scopes,
            signing_key,
            key_id: key.private_key_id.clone(),
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub(crate) fn claims(&self, now: DateTime<Utc>) -> AssertionClaims {
        let iat = now.timestamp();
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    pub(crate) fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        jsonwebtoken::encode(&header, &self.claims(now), &self.signing_key)
            .map_err(|e| StoreError::Auth(format!("failed to sign assertion: {e}")))
    }

    /// Returns a valid access token, exchanging a new assertion when the
    /// cached one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token(now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<CachedToken, StoreError> {
        let assertion = self.sign_assertion(now)?;
        tracing::debug!(client_email = %self.client_email, "Exchanging service account assertion");

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Auth(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            return Err(StoreError::Auth(describe_token_error(status.as_u16(), &body)));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Auth(format!("failed to parse token response: {e}")))?;

        Ok(CachedToken {
            access_token: parsed.access_token,
            expires_at: now + Duration::seconds(parsed.expires_in),
        })
    }
}

fn describe_token_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(TokenErrorResponse {
            error,
            error_description: Some(description),
        }) => format!("HTTP {status}: {error}: {description}"),
        Ok(TokenErrorResponse { error, .. }) => format!("HTTP {status}: {error}"),
        Err(_) => format!("HTTP {status}: {body}"),
    }
}
