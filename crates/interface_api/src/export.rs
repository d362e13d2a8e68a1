//! Drive export orchestration
//!
//! Ties the client book to the uploader: takes a snapshot of every client and
//! hands it to the retrying uploader, which names each attempt's file after
//! the instant it is made. Also owns the OAuth consent round trip, since both sides share
//! the credential store.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Url;
use thiserror::Error;
use tracing::{info, instrument};

use domain_client::{ClientError, ClientService};
use infra_export::{
    export_file_name, snapshot_bytes, CredentialStore, ExportUploader, OAuthClient, RemoteFile,
    UploadError,
};

use crate::dto::clients::ClientResponse;
use crate::error::ApiError;

/// Errors raised by an export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Clients(#[from] ClientError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl ExportError {
    /// Returns true when the export was skipped because Drive is not set up
    pub fn is_precondition(&self) -> bool {
        matches!(self, ExportError::Upload(e) if e.is_precondition())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Clients(e) => e.into(),
            ExportError::Upload(e) => e.into(),
        }
    }
}

/// Snapshot export and Drive authorization
#[derive(Clone)]
pub struct ExportService {
    clients: ClientService,
    credentials: Arc<dyn CredentialStore>,
    uploader: Option<ExportUploader>,
    oauth: Option<OAuthClient>,
}

impl ExportService {
    /// Creates a new service
    ///
    /// `uploader` and `oauth` are absent when no OAuth client is configured.
    pub fn new(
        clients: ClientService,
        credentials: Arc<dyn CredentialStore>,
        uploader: Option<ExportUploader>,
        oauth: Option<OAuthClient>,
    ) -> Self {
        Self {
            clients,
            credentials,
            uploader,
            oauth,
        }
    }

    /// Returns true if a credential bundle is stored
    pub async fn is_authorized(&self) -> Result<bool, UploadError> {
        Ok(self.credentials.load().await?.is_some())
    }

    /// Uploads a snapshot of the whole client book
    ///
    /// # Errors
    ///
    /// - `UploadError::NotAuthorized` when no credentials are stored
    /// - `UploadError::NotConfigured` when there is no OAuth client
    /// - `UploadError::Exhausted` once every attempt failed
    #[instrument(skip(self))]
    pub async fn export_now(&self) -> Result<RemoteFile, ExportError> {
        if !self.is_authorized().await? {
            return Err(UploadError::NotAuthorized.into());
        }
        let uploader = self.uploader.as_ref().ok_or(UploadError::NotConfigured)?;

        let clients: Vec<ClientResponse> = self
            .clients
            .list_clients(None)
            .await?
            .into_iter()
            .map(ClientResponse::from)
            .collect();

        let now = Utc::now();
        let bytes = snapshot_bytes(&clients, now)?;
        let file = uploader
            .upload(|| export_file_name(Utc::now()), &bytes)
            .await?;
        info!(clients = clients.len(), file_id = %file.id, "Client book exported");
        Ok(file)
    }

    /// Consent URL for the Drive authorization round trip
    pub fn authorize_url(&self) -> Result<Url, UploadError> {
        self.oauth
            .as_ref()
            .ok_or(UploadError::NotConfigured)?
            .authorize_url()
    }

    /// Exchanges the callback code and stores the resulting credentials
    #[instrument(skip(self, code))]
    pub async fn complete_authorization(&self, code: &str) -> Result<(), UploadError> {
        let oauth = self.oauth.as_ref().ok_or(UploadError::NotConfigured)?;
        let bundle = oauth.exchange_code(code).await?;
        self.credentials.save(&bundle).await?;
        info!(has_refresh_token = bundle.can_refresh(), "Drive authorization stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::ports::mock::MockClientPort;
    use infra_export::{CredentialBundle, InMemoryCredentialStore, OAuthConfig};

    fn service(bundle: Option<CredentialBundle>, oauth: Option<OAuthClient>) -> ExportService {
        let credentials = Arc::new(match bundle {
            Some(b) => InMemoryCredentialStore::with_bundle(b),
            None => InMemoryCredentialStore::new(),
        });
        let clients = ClientService::new(Arc::new(MockClientPort::new()));
        ExportService::new(clients, credentials, None, oauth)
    }

    #[tokio::test]
    async fn test_export_requires_credentials_first() {
        let err = service(None, None).export_now().await.unwrap_err();
        assert!(matches!(err, ExportError::Upload(UploadError::NotAuthorized)));
        assert!(err.is_precondition());
    }

    #[tokio::test]
    async fn test_export_without_oauth_client_is_not_configured() {
        let err = service(Some(CredentialBundle::new("a")), None)
            .export_now()
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Upload(UploadError::NotConfigured)));
    }

    #[test]
    fn test_authorize_url_requires_oauth_client() {
        assert!(matches!(
            service(None, None).authorize_url(),
            Err(UploadError::NotConfigured)
        ));

        let oauth = OAuthClient::new(OAuthConfig::new("id", "secret", "http://localhost/cb"));
        let url = service(None, Some(oauth)).authorize_url().unwrap();
        assert!(url.as_str().contains("access_type=offline"));
    }
}
