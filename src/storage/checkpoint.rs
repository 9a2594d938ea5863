//! File-backed checkpoint store.
//!
//! One current value, not a log: the last identifier whose batch fully
//! completed. Written only by the scheduler between batches, so no
//! concurrent-access guarantees are needed; the write itself is atomic
//! (temp file then rename) so a crash never leaves a half-written value.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Durable single-value store for the resume marker.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Read the current value; `None` means no checkpoint.
    async fn read(&self) -> Result<Option<String>>;

    /// Overwrite the current value; `None` clears it.
    async fn write(&self, id: Option<&str>) -> Result<()>;
}

/// Checkpoint persisted as a single plain-text file.
#[derive(Debug, Clone)]
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    /// Create a checkpoint store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpoint {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write(&self, id: Option<&str>) -> Result<()> {
        // An empty payload represents "no checkpoint".
        self.write_bytes(id.unwrap_or_default().as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_absent_file_reads_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileCheckpoint::new(tmp.path().join("last_processed_id.txt"));

        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let store = FileCheckpoint::new(tmp.path().join("last_processed_id.txt"));

        store.write(Some("00000042")).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some("00000042".to_string()));

        store.write(Some("00000043")).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some("00000043".to_string()));
    }

    #[tokio::test]
    async fn test_clear_reads_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileCheckpoint::new(tmp.path().join("last_processed_id.txt"));

        store.write(Some("00000042")).await.unwrap();
        store.write(None).await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_processed_id.txt");
        let store = FileCheckpoint::new(&path);

        store.write(Some("00000042")).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FileCheckpoint::new(tmp.path().join("state/last_processed_id.txt"));

        store.write(Some("00000001")).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some("00000001".to_string()));
    }
}
