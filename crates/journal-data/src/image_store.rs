//! Local-disk image storage.

use async_trait::async_trait;
use journal_core::error::StorageError;
use journal_core::traits::{ImageStore, ALLOWED_IMAGE_TYPES};
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Stores trade screenshots under a root directory as
/// `<root>/trades/<trade_id>/<uuid>.<ext>`.
pub struct LocalImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalImageStore {
    /// Create a store rooted at `root`. The directory is created on first upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Set the maximum accepted image size.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Get root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn trade_dir(&self, trade_id: u64) -> PathBuf {
        self.root.join("trades").join(trade_id.to_string())
    }

    /// Stored images for a trade, sorted by path.
    pub async fn images_for(&self, trade_id: u64) -> Result<Vec<String>, StorageError> {
        let dir = self.trade_dir(trade_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                images.push(entry.path().display().to_string());
            }
        }
        images.sort();
        Ok(images)
    }

    /// Whether `path` names a file inside this store's root.
    fn owns(&self, path: &Path) -> bool {
        let no_parent_refs = path
            .components()
            .all(|c| !matches!(c, Component::ParentDir));
        no_parent_refs && path.starts_with(&self.root)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(
        &self,
        trade_id: u64,
        filename: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(StorageError::UnsupportedType(content_type.to_string()));
        }
        if content.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                size: content.len(),
                max: self.max_bytes,
            });
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        let dir = self.trade_dir(trade_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}{}", Uuid::new_v4(), extension));
        tokio::fs::write(&path, content).await?;

        info!(trade_id, path = %path.display(), bytes = content.len(), "Stored trade image");
        Ok(path.display().to_string())
    }

    async fn delete(&self, image_url: &str) -> Result<bool, StorageError> {
        let path = Path::new(image_url);
        if !self.owns(path) {
            warn!(image_url, "Refusing to delete image outside the store");
            return Ok(false);
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let url = store
            .upload(7, "Chart.PNG", b"\x89PNG", "image/png")
            .await
            .unwrap();

        assert!(url.starts_with(&dir.path().join("trades").join("7").display().to_string()));
        assert!(url.ends_with(".png"));
        assert_eq!(tokio::fs::read(&url).await.unwrap(), b"\x89PNG");
        assert_eq!(store.images_for(7).await.unwrap(), vec![url.clone()]);

        assert!(store.delete(&url).await.unwrap());
        assert!(!store.delete(&url).await.unwrap());
        assert!(store.images_for(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_unsupported_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());
        assert!(matches!(
            store.upload(1, "notes.pdf", b"%PDF", "application/pdf").await,
            Err(StorageError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path()).with_max_bytes(4);
        assert!(matches!(
            store.upload(1, "big.jpg", &[0u8; 5], "image/jpeg").await,
            Err(StorageError::TooLarge { size: 5, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_delete_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("images"));

        let outside = dir.path().join("keep.png");
        tokio::fs::write(&outside, b"x").await.unwrap();
        assert!(!store.delete(&outside.display().to_string()).await.unwrap());

        let escape = dir.path().join("images").join("..").join("keep.png");
        assert!(!store.delete(&escape.display().to_string()).await.unwrap());
        assert!(outside.exists());
    }
}
