//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::{CoreError, Timezone};
use infra_export::{OAuthConfig, RetryPolicy};

/// API configuration
///
/// Every field has a default, so an empty environment yields a runnable
/// development setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// IANA timezone that defines the agency's "today"
    pub timezone: String,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Administrator login
    pub admin_username: String,
    pub admin_password: String,
    /// Google OAuth client registration; Drive export is disabled without it
    pub drive_client_id: Option<String>,
    pub drive_client_secret: Option<String>,
    pub drive_redirect_uri: String,
    /// Credential bundle file
    pub drive_token_path: String,
    /// Upload audit log file
    pub drive_log_path: String,
    /// Upload retry cap
    pub upload_max_attempts: u32,
    /// Backoff base in milliseconds
    pub upload_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://agency.db?mode=rwc".to_string(),
            log_level: "info".to_string(),
            timezone: "UTC".to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            admin_username: "admin".to_string(),
            admin_password: "change-me-in-production".to_string(),
            drive_client_id: None,
            drive_client_secret: None,
            drive_redirect_uri: "http://localhost:5000/auth/google/callback".to_string(),
            drive_token_path: "drive_tokens.json".to_string(),
            drive_log_path: "drive_upload.log".to_string(),
            upload_max_attempts: 3,
            upload_backoff_ms: 1000,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and `GOOGLE_REDIRECT_URI`
    /// fill the Drive settings when their `API_DRIVE_*` counterparts are unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut config: ApiConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()?;

        if config.drive_client_id.is_none() {
            config.drive_client_id = std::env::var("GOOGLE_CLIENT_ID").ok();
        }
        if config.drive_client_secret.is_none() {
            config.drive_client_secret = std::env::var("GOOGLE_CLIENT_SECRET").ok();
        }
        if std::env::var("API_DRIVE_REDIRECT_URI").is_err() {
            if let Ok(uri) = std::env::var("GOOGLE_REDIRECT_URI") {
                config.drive_redirect_uri = uri;
            }
        }
        Ok(config)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }

    /// OAuth registration, present only when both id and secret are set
    pub fn oauth_config(&self) -> Option<OAuthConfig> {
        let id = self.drive_client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.drive_client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some(OAuthConfig::new(id, secret, &self.drive_redirect_uri))
    }

    /// Upload retry policy
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.upload_max_attempts,
            Duration::from_millis(self.upload_backoff_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.timezone().unwrap().name(), "UTC");
        assert!(config.oauth_config().is_none());
    }

    #[test]
    fn test_oauth_requires_id_and_secret() {
        let mut config = ApiConfig {
            drive_client_id: Some("id".to_string()),
            ..Default::default()
        };
        assert!(config.oauth_config().is_none());

        config.drive_client_secret = Some("secret".to_string());
        let oauth = config.oauth_config().unwrap();
        assert_eq!(oauth.redirect_uri, "http://localhost:5000/auth/google/callback");
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let config = ApiConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(config.timezone().is_err());
    }
}
