//! Google Drive v3 storage client
//!
//! Files are created with a single `multipart/related` request carrying the
//! metadata part and the media part. Each request gets a random boundary so
//! client text in the payload cannot terminate a part early.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

use crate::credentials::CredentialBundle;
use crate::error::UploadError;
use crate::oauth::OAuthClient;
use crate::storage::{RemoteFile, StorageClient};

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&fields=id,name";

/// Drive client creating files with a bearer token
#[derive(Debug, Clone)]
pub struct GoogleDriveClient {
    http: reqwest::Client,
    oauth: OAuthClient,
    upload_url: String,
}

impl GoogleDriveClient {
    /// Creates a client that refreshes tokens through `oauth`
    pub fn new(oauth: OAuthClient) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth,
            upload_url: UPLOAD_URL.to_string(),
        }
    }

    /// Overrides the upload endpoint
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Returns the OAuth client
    pub fn oauth(&self) -> &OAuthClient {
        &self.oauth
    }
}

fn new_boundary() -> String {
    format!("agency_books_{}", uuid::Uuid::new_v4().simple())
}

/// Assembles the `multipart/related` body for a JSON file
fn multipart_body(boundary: &str, name: &str, content: &[u8]) -> Result<Vec<u8>, UploadError> {
    let metadata = serde_json::to_string(&json!({
        "name": name,
        "mimeType": "application/json",
    }))?;

    let mut body = Vec::with_capacity(content.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
             --{boundary}\r\nContent-Type: application/json\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Ok(body)
}

#[async_trait]
impl StorageClient for GoogleDriveClient {
    #[instrument(skip(self, access_token, content), fields(bytes = content.len()))]
    async fn create_file(
        &self,
        access_token: &str,
        name: &str,
        content: &[u8],
    ) -> Result<RemoteFile, UploadError> {
        let boundary = new_boundary();
        let body = multipart_body(&boundary, name, content)?;

        let response = self
            .http
            .post(&self.upload_url)
            .bearer_auth(access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Unauthorized(message));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let file: RemoteFile = response.json().await?;
        debug!(file_id = %file.id, "Drive file created");
        Ok(file)
    }

    async fn refresh(&self, credentials: &CredentialBundle) -> Result<CredentialBundle, UploadError> {
        let token = credentials
            .refresh_token
            .as_deref()
            .ok_or_else(|| UploadError::Unauthorized("no refresh token stored".to_string()))?;
        self.oauth.refresh(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("b1", "clients-export-1.json", br#"{"clients":[]}"#).unwrap();
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with("--b1\r\n"));
        assert!(text.contains(r#""name":"clients-export-1.json""#));
        assert!(text.contains("\r\n\r\n{\"clients\":[]}\r\n"));
        assert!(text.ends_with("--b1--\r\n"));
    }

    #[test]
    fn test_boundary_differs_per_request() {
        let first = new_boundary();
        let second = new_boundary();
        assert_ne!(first, second);
        assert!(first.starts_with("agency_books_"));

        let notes = br#"{"notes":"--agency_books_export_boundary--"}"#;
        let text = String::from_utf8(multipart_body(&first, "x.json", notes).unwrap()).unwrap();
        assert_eq!(text.matches(&format!("--{first}")).count(), 3);
    }
}
