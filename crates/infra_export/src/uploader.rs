//! Retrying export uploader
//!
//! # Attempt loop
//!
//! ```text
//! attempt n:  log start -> refresh if stale -> name file -> create file
//!               ok   -> log success, return
//!               err  -> log failure -> (401 + refresh token) refresh once
//!                    -> sleep base * 2^(n-1)
//! ```
//!
//! Every attempt creates a freshly named file. Every successful refresh is
//! merged into the stored bundle and saved.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::audit::UploadLog;
use crate::credentials::{CredentialBundle, CredentialStore};
use crate::error::UploadError;
use crate::storage::{RemoteFile, StorageClient};

/// Retry cap and backoff base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy; at least one attempt is always made
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    /// Delay after failed attempt `attempt` (1-based)
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_backoff.saturating_mul(factor)
    }
}

/// Uploads export files with token refresh and retry
#[derive(Clone)]
pub struct ExportUploader {
    storage: Arc<dyn StorageClient>,
    credentials: Arc<dyn CredentialStore>,
    log: Arc<dyn UploadLog>,
    policy: RetryPolicy,
}

impl ExportUploader {
    /// Creates a new uploader
    pub fn new(
        storage: Arc<dyn StorageClient>,
        credentials: Arc<dyn CredentialStore>,
        log: Arc<dyn UploadLog>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            storage,
            credentials,
            log,
            policy,
        }
    }

    /// Returns the retry policy
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Returns true if a credential bundle is stored
    pub async fn is_authorized(&self) -> Result<bool, UploadError> {
        Ok(self.credentials.load().await?.is_some())
    }

    /// Uploads `content` as a new file, asking `name` for the file name on
    /// every attempt
    ///
    /// # Errors
    ///
    /// - `UploadError::NotAuthorized` when no credentials are stored; nothing
    ///   is attempted
    /// - `UploadError::Exhausted` carrying the last failure once every attempt
    ///   has failed
    #[instrument(skip(self, name, content), fields(bytes = content.len()))]
    pub async fn upload<N>(&self, name: N, content: &[u8]) -> Result<RemoteFile, UploadError>
    where
        N: Fn() -> String + Send + Sync,
    {
        let mut current = self
            .credentials
            .load()
            .await?
            .ok_or(UploadError::NotAuthorized)?;

        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<UploadError> = None;

        for attempt in 1..=max_attempts {
            self.log
                .append(&format!("Upload attempt {} starting", attempt))
                .await;

            if current.can_refresh() && current.is_stale(Utc::now().timestamp_millis()) {
                if let Ok(refreshed) = self.refresh(&current).await {
                    current = refreshed;
                }
            }

            let file_name = name();
            match self.storage.create_file(&current.access_token, &file_name, content).await {
                Ok(file) => {
                    let summary = serde_json::to_string(&file)?;
                    self.log.append(&format!("Upload succeeded: {}", summary)).await;
                    info!(attempt, file_id = %file.id, "Export uploaded");
                    return Ok(file);
                }
                Err(err) => {
                    self.log
                        .append(&format!("Upload failed on attempt {}: {}", attempt, err))
                        .await;
                    warn!(attempt, error = %err, "Export upload attempt failed");

                    if err.is_unauthorized() && current.can_refresh() {
                        if let Ok(refreshed) = self.refresh(&current).await {
                            current = refreshed;
                        }
                    }
                    last_error = Some(err);
                }
            }

            tokio::time::sleep(self.policy.backoff_after(attempt)).await;
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempt was made".to_string());
        self.log
            .append(&format!("All upload attempts failed: {}", message))
            .await;

        Err(UploadError::Exhausted {
            attempts: max_attempts,
            message,
        })
    }

    /// Runs a refresh grant, merging and saving the result
    async fn refresh(&self, current: &CredentialBundle) -> Result<CredentialBundle, UploadError> {
        match self.storage.refresh(current).await {
            Ok(update) => {
                let merged = current.clone().merge(update);
                self.log.append("Access token refreshed").await;
                if let Err(e) = self.credentials.save(&merged).await {
                    warn!(error = %e, "Failed to persist refreshed credentials");
                }
                Ok(merged)
            }
            Err(e) => {
                self.log.append(&format!("Refresh failed: {}", e)).await;
                Err(e)
            }
        }
    }
}
