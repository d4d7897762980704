//! Object storage abstraction for uploaded documents.
//!
//! The blob-storage provider is pluggable behind [`StorageBackend`]; the
//! default backend writes to the local filesystem and serves files under a
//! configured base URL.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Uploaded file metadata.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Storage key (path or object key).
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// MD5 hash of the file.
    pub md5: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload a file.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str)
    -> AppResult<UploadedFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<UploadedFile> {
        let path = self.base_path.join(key);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Upload(format!("Failed to create directory: {e}")))?;
        }

        // Write file
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to write file: {e}")))?;

        // Calculate MD5
        let md5 = format!("{:x}", md5::compute(data));

        Ok(UploadedFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(path.exists())
    }
}

/// Storage backend that stores nothing. Used in tests and in deployments
/// that only catalog physical books.
#[derive(Debug, Clone, Default)]
pub struct NoOpStorage;

#[async_trait::async_trait]
impl StorageBackend for NoOpStorage {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<UploadedFile> {
        Ok(UploadedFile {
            key: key.to_string(),
            url: format!("noop://{key}"),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5: format!("{:x}", md5::compute(data)),
        })
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("noop://{key}")
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }
}

/// Generate a unique, content-derived storage key for an uploaded file.
///
/// The MD5 of the content keeps keys stable for identical uploads while the
/// original extension is preserved for content-type sniffing downstream.
#[must_use]
pub fn generate_storage_key(folder: &str, data: &[u8], original_name: &str) -> String {
    let md5 = format!("{:x}", md5::compute(data));

    // Extract extension from original name
    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && !ext.is_empty())
        .unwrap_or("bin");

    format!("{folder}/{md5}.{extension}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_storage_key() {
        let key = generate_storage_key("pdf_books", b"hello", "report.pdf");
        assert!(key.starts_with("pdf_books/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn test_generate_storage_key_no_extension() {
        let key = generate_storage_key("pdf_books", b"hello", "file");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_storage_key_is_content_addressed() {
        let a = generate_storage_key("pdf_books", b"same bytes", "a.pdf");
        let b = generate_storage_key("pdf_books", b"same bytes", "b.pdf");
        assert_eq!(a, b);

        let c = generate_storage_key("pdf_books", b"other bytes", "a.pdf");
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_noop_storage_reports_size_and_md5() {
        let storage = NoOpStorage;
        let uploaded = storage
            .upload("pdf_books/x.pdf", b"content", "application/pdf")
            .await
            .unwrap();
        assert_eq!(uploaded.size, 7);
        assert_eq!(uploaded.md5, format!("{:x}", md5::compute(b"content")));
    }
}
