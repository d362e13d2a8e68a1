//! Google OAuth 2.0 web-server flow
//!
//! Builds the consent URL, exchanges authorization codes, and runs refresh
//! grants. Token endpoint responses carry a relative `expires_in`, which is
//! converted to an absolute `expiry_date` in epoch milliseconds.

use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::credentials::CredentialBundle;
use crate::error::UploadError;

/// Scope limited to files this application creates
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth client registration
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthConfig {
    /// Creates a configuration against Google's endpoints
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Overrides the token endpoint
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TokenResponse {
    fn into_bundle(self, now_ms: i64) -> CredentialBundle {
        CredentialBundle {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expiry_date: self.expires_in.map(|secs| now_ms + secs * 1000),
            scope: self.scope,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            extra: self.extra,
        }
    }
}

/// Client for the OAuth authorization and token endpoints
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl OAuthClient {
    /// Creates a new client
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Creates a client sharing an existing HTTP connection pool
    pub fn with_http(http: reqwest::Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Builds the consent URL requesting offline access
    ///
    /// `prompt=consent` makes Google issue a refresh token on every consent.
    pub fn authorize_url(&self) -> Result<Url, UploadError> {
        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", DRIVE_FILE_SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| UploadError::Serialization(format!("invalid auth url: {}", e)))
    }

    /// Exchanges an authorization code for a credential bundle
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<CredentialBundle, UploadError> {
        let form = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let bundle = self.token_request(&form).await?;
        debug!(has_refresh_token = bundle.can_refresh(), "Exchanged authorization code");
        Ok(bundle)
    }

    /// Runs a refresh grant
    ///
    /// The result usually lacks a refresh token; merge it into the stored
    /// bundle with [`CredentialBundle::merge`].
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<CredentialBundle, UploadError> {
        let form = [
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];
        self.token_request(&form).await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<CredentialBundle, UploadError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(if status == reqwest::StatusCode::UNAUTHORIZED {
                UploadError::Unauthorized(message)
            } else {
                UploadError::Remote {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.into_bundle(Utc::now().timestamp_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OAuthClient {
        OAuthClient::new(OAuthConfig::new(
            "client-1",
            "secret",
            "http://localhost:5000/auth/google/callback",
        ))
    }

    #[test]
    fn test_authorize_url_requests_offline_consent() {
        let url = client().authorize_url().unwrap();
        let params: Map<String, Value> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["prompt"], "consent");
        assert_eq!(params["scope"], DRIVE_FILE_SCOPE);
        assert_eq!(params["client_id"], "client-1");
        assert_eq!(params["redirect_uri"], "http://localhost:5000/auth/google/callback");
    }

    #[test]
    fn test_token_response_converts_relative_expiry() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "a",
            "expires_in": 3599,
            "scope": DRIVE_FILE_SCOPE,
            "token_type": "Bearer",
            "id_token": "x"
        }))
        .unwrap();

        let bundle = token.into_bundle(1_000);
        assert_eq!(bundle.expiry_date, Some(1_000 + 3_599_000));
        assert_eq!(bundle.refresh_token, None);
        assert_eq!(bundle.extra["id_token"], "x");
    }
}
