//! Export error types

use thiserror::Error;

/// Errors raised while loading or saving the credential bundle
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backing file could not be read or written
    #[error("Credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle could not be encoded
    #[error("Credential encoding error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors that can occur while uploading an export
#[derive(Debug, Error)]
pub enum UploadError {
    /// No credential bundle is stored
    #[error("Not authorized with Google Drive. Visit /auth/google to authorize.")]
    NotAuthorized,

    /// The OAuth client id or secret is missing
    #[error("Google OAuth client is not configured")]
    NotConfigured,

    /// The remote rejected the access token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Every attempt failed; carries the last failure
    #[error("Upload failed after {attempts} attempts: {message}")]
    Exhausted { attempts: u32, message: String },

    /// Credential storage failed
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// The payload or a response could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl UploadError {
    /// Returns true if the remote rejected the access token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, UploadError::Unauthorized(_))
    }

    /// Returns true for failures the caller should fix rather than retry
    pub fn is_precondition(&self) -> bool {
        matches!(self, UploadError::NotAuthorized | UploadError::NotConfigured)
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) if status == reqwest::StatusCode::UNAUTHORIZED => {
                UploadError::Unauthorized(error.to_string())
            }
            Some(status) => UploadError::Remote {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None if error.is_decode() => UploadError::Serialization(error.to_string()),
            None => UploadError::Transport(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(error: serde_json::Error) -> Self {
        UploadError::Serialization(error.to_string())
    }
}
