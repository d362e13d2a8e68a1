//! OAuth credential bundle and its storage
//!
//! There is a single process-wide credential slot. Production keeps it in a
//! JSON file; tests use the in-memory store. Concurrent uploads may read and
//! write the file at the same time and the last writer wins. Saves go through
//! a temporary file renamed over the old one, so a reader sees either the old
//! bundle or the new one and never a partial write.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::CredentialError;

/// Tokens are treated as stale this long before they actually expire
pub const EXPIRY_SKEW_MS: i64 = 60_000;

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// OAuth credentials as issued by the provider
///
/// Fields the provider returns beyond the known ones are kept in `extra` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialBundle {
    /// Creates a bundle holding only an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry_date: None,
            scope: None,
            token_type: default_token_type(),
            extra: Map::new(),
        }
    }

    /// Sets the refresh token
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Sets the absolute expiry
    pub fn with_expiry_date(mut self, epoch_ms: i64) -> Self {
        self.expiry_date = Some(epoch_ms);
        self
    }

    /// Returns true if a refresh grant can be attempted
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns true if the access token is expired or expires within the skew
    ///
    /// A bundle without an expiry is never stale.
    pub fn is_stale(&self, now_ms: i64) -> bool {
        self.expiry_date
            .is_some_and(|expiry| expiry - EXPIRY_SKEW_MS <= now_ms)
    }

    /// Overlays `update` onto this bundle without dropping known fields
    ///
    /// Values present in `update` win; anything it leaves out (typically the
    /// refresh token, which refresh grants do not repeat) is kept.
    pub fn merge(mut self, update: CredentialBundle) -> CredentialBundle {
        if !update.access_token.is_empty() {
            self.access_token = update.access_token;
        }
        if update.refresh_token.is_some() {
            self.refresh_token = update.refresh_token;
        }
        if update.expiry_date.is_some() {
            self.expiry_date = update.expiry_date;
        }
        if update.scope.is_some() {
            self.scope = update.scope;
        }
        if !update.token_type.is_empty() {
            self.token_type = update.token_type;
        }
        self.extra.extend(update.extra);
        self
    }
}

/// Storage for the single credential slot
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored bundle; `None` means not authorized
    async fn load(&self) -> Result<Option<CredentialBundle>, CredentialError>;

    /// Replaces the stored bundle
    async fn save(&self, bundle: &CredentialBundle) -> Result<(), CredentialError>;
}

/// Credential store backed by a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<CredentialBundle>, CredentialError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<CredentialBundle>(&raw) {
            Ok(bundle) => Ok(Some(bundle)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable credential file");
                Ok(None)
            }
        }
    }

    async fn save(&self, bundle: &CredentialBundle) -> Result<(), CredentialError> {
        let json = serde_json::to_string_pretty(bundle)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, json.as_bytes()))
            .await
            .map_err(std::io::Error::other)??;
        debug!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }
}

/// Writes `contents` to a sibling temporary file and renames it onto `path`
fn replace_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Credential store held in memory
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: RwLock<Option<CredentialBundle>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a bundle
    pub fn with_bundle(bundle: CredentialBundle) -> Self {
        Self {
            slot: RwLock::new(Some(bundle)),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<CredentialBundle>, CredentialError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, bundle: &CredentialBundle) -> Result<(), CredentialError> {
        *self.slot.write().await = Some(bundle.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_staleness_uses_skew() {
        let bundle = CredentialBundle::new("a").with_expiry_date(1_000_000);
        assert!(!bundle.is_stale(1_000_000 - EXPIRY_SKEW_MS - 1));
        assert!(bundle.is_stale(1_000_000 - EXPIRY_SKEW_MS));
        assert!(bundle.is_stale(2_000_000));
        assert!(!CredentialBundle::new("a").is_stale(i64::MAX));
    }

    #[test]
    fn test_merge_keeps_refresh_token_and_extras() {
        let mut stored = CredentialBundle::new("old")
            .with_refresh_token("r1")
            .with_expiry_date(10);
        stored.extra.insert("id_token".to_string(), json!("abc"));

        let update = CredentialBundle::new("new").with_expiry_date(20);
        let merged = stored.merge(update);

        assert_eq!(merged.access_token, "new");
        assert_eq!(merged.refresh_token.as_deref(), Some("r1"));
        assert_eq!(merged.expiry_date, Some(20));
        assert_eq!(merged.extra["id_token"], "abc");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "access_token": "a",
            "refresh_token": "r",
            "expiry_date": 123,
            "token_type": "Bearer",
            "refresh_token_expires_in": 604799
        });
        let bundle: CredentialBundle = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(bundle.extra["refresh_token_expires_in"], 604799);
        assert_eq!(serde_json::to_value(&bundle).unwrap(), raw);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_none());
        store.save(&CredentialBundle::new("a")).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().access_token, "a");
    }
}
