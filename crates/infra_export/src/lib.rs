//! Export Uploader
//!
//! Pushes a JSON snapshot of the client book to Google Drive. Each upload is
//! gated on a stored OAuth credential bundle, refreshes the access token when
//! it is stale or rejected, retries with exponential backoff, and appends
//! every step to an audit log.
//!
//! The collaborators are traits so the retry loop can be exercised without a
//! network or a filesystem:
//!
//! - [`CredentialStore`]: where the credential bundle lives
//! - [`UploadLog`]: the append-only audit trail
//! - [`StorageClient`]: file creation and token refresh against the remote
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_export::{ExportUploader, RetryPolicy};
//!
//! let uploader = ExportUploader::new(drive, credentials, log, RetryPolicy::default());
//! let file = uploader.upload(|| export_file_name(Utc::now()), &bytes).await?;
//! ```

pub mod error;
pub mod credentials;
pub mod audit;
pub mod storage;
pub mod oauth;
pub mod drive;
pub mod snapshot;
pub mod uploader;

pub use error::{UploadError, CredentialError};
pub use credentials::{CredentialBundle, CredentialStore, FileCredentialStore, InMemoryCredentialStore};
pub use audit::{UploadLog, FileUploadLog, InMemoryUploadLog};
pub use storage::{StorageClient, RemoteFile};
pub use oauth::{OAuthClient, OAuthConfig, DRIVE_FILE_SCOPE};
pub use drive::GoogleDriveClient;
pub use snapshot::{export_file_name, snapshot_bytes};
pub use uploader::{ExportUploader, RetryPolicy};
