//! Remote storage abstraction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::CredentialBundle;
use crate::error::UploadError;

/// A file created on the remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

/// Operations the uploader needs from the remote storage service
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Creates a new JSON file
    ///
    /// # Errors
    ///
    /// `UploadError::Unauthorized` when the access token is rejected
    async fn create_file(
        &self,
        access_token: &str,
        name: &str,
        content: &[u8],
    ) -> Result<RemoteFile, UploadError>;

    /// Runs a refresh grant
    ///
    /// # Returns
    ///
    /// A partial bundle to merge into `credentials`
    async fn refresh(&self, credentials: &CredentialBundle) -> Result<CredentialBundle, UploadError>;
}
