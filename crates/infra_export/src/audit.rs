//! Append-only upload audit log
//!
//! Lines are written as `[<RFC 3339>] <line>`. A failure to write the log is
//! reported through tracing and never fails the upload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Sink for upload audit lines
#[async_trait]
pub trait UploadLog: Send + Sync {
    /// Appends one line; never fails
    async fn append(&self, line: &str);
}

fn stamp(line: &str) -> String {
    format!("[{}] {}", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true), line)
}

/// Audit log appended to a text file
#[derive(Debug, Clone)]
pub struct FileUploadLog {
    path: PathBuf,
}

impl FileUploadLog {
    /// Creates a log writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", stamp(line)).as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl UploadLog for FileUploadLog {
    async fn append(&self, line: &str) {
        info!(target: "drive_upload", "{}", line);
        if let Err(e) = self.write_line(line).await {
            error!(path = %self.path.display(), error = %e, "Failed to write drive log");
        }
    }
}

/// Audit log kept in memory, without timestamps
#[derive(Debug, Default)]
pub struct InMemoryUploadLog {
    lines: Mutex<Vec<String>>,
}

impl InMemoryUploadLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every appended line
    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }

    /// Counts lines starting with `prefix`
    pub async fn count_starting_with(&self, prefix: &str) -> usize {
        self.lines
            .lock()
            .await
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl UploadLog for InMemoryUploadLog {
    async fn append(&self, line: &str) {
        self.lines.lock().await.push(line.to_string());
    }
}
