//! Upload store for chat attachments and business logos.
//!
//! Files land in a flat directory with generated unique names; documents
//! reference them by relative path. Removal is best effort: a failed
//! delete is logged and swallowed.

use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::config::UploadsConfig;

/// Accepted attachment content types.
const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
];

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only JPG, JPEG, PNG, and PDF files are allowed")]
    UnsupportedType,

    #[error("File exceeds the maximum allowed size")]
    TooLarge,

    #[error("Failed to store file: {0}")]
    Io(String),
}

/// Filesystem-backed store for uploaded files.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_size: usize,
}

impl UploadStore {
    /// Creates a new UploadStore from configuration.
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_file_size: config.max_file_size,
        }
    }

    /// Ensures the upload directory exists.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))
    }

    /// Validates and stores an uploaded file, returning its relative path.
    ///
    /// The stored name is `{field}-{timestamp}-{random}.{ext}`, with the
    /// extension taken from the original filename.
    pub async fn save(
        &self,
        field_name: &str,
        original_filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(UploadError::UnsupportedType);
        }
        if bytes.len() > self.max_file_size {
            return Err(UploadError::TooLarge);
        }

        let extension = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let unique_suffix = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u64)
        );
        let filename = format!("{}-{}.{}", field_name, unique_suffix, extension);

        self.ensure_dir().await?;
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Removes a stored file, logging and swallowing any failure.
    pub async fn remove(&self, path: &str) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path, error = %e, "Failed to delete uploaded file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &str) -> UploadStore {
        UploadStore::new(&UploadsConfig {
            dir: dir.to_string(),
            max_file_size: 1024,
        })
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = std::env::temp_dir().join("bizflow-upload-test");
        let store = test_store(dir.to_str().unwrap());

        let path = store
            .save("attachment", "photo.png", "image/png", b"fake-png-bytes")
            .await
            .unwrap();

        assert!(path.ends_with(".png"));
        assert!(tokio::fs::metadata(&path).await.is_ok());

        store.remove(&path).await;
        assert!(tokio::fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_type() {
        let dir = std::env::temp_dir().join("bizflow-upload-test");
        let store = test_store(dir.to_str().unwrap());

        let result = store
            .save("attachment", "script.sh", "text/x-shellscript", b"#!/bin/sh")
            .await;
        assert!(matches!(result, Err(UploadError::UnsupportedType)));
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_file() {
        let dir = std::env::temp_dir().join("bizflow-upload-test");
        let store = test_store(dir.to_str().unwrap());

        let big = vec![0u8; 2048];
        let result = store.save("attachment", "big.pdf", "application/pdf", &big).await;
        assert!(matches!(result, Err(UploadError::TooLarge)));
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_swallowed() {
        let dir = std::env::temp_dir().join("bizflow-upload-test");
        let store = test_store(dir.to_str().unwrap());
        // Must not panic or error
        store.remove("does/not/exist.png").await;
    }

    #[tokio::test]
    async fn test_unique_names_for_same_original() {
        let dir = std::env::temp_dir().join("bizflow-upload-test");
        let store = test_store(dir.to_str().unwrap());

        let a = store
            .save("attachment", "photo.png", "image/png", b"one")
            .await
            .unwrap();
        let b = store
            .save("attachment", "photo.png", "image/png", b"two")
            .await
            .unwrap();
        assert_ne!(a, b);

        store.remove(&a).await;
        store.remove(&b).await;
    }
}
