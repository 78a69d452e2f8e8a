//! Image store trait definition.

use crate::error::StorageError;
use async_trait::async_trait;

/// Content types accepted for trade screenshots.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Trait for binary image storage backends.
///
/// Implementations are constructed once at startup and passed to whatever
/// needs them.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image for a trade.
    ///
    /// # Arguments
    /// * `trade_id` - Trade the image belongs to
    /// * `filename` - Original file name, used for its extension
    /// * `content` - Raw image bytes
    /// * `content_type` - MIME type, one of [`ALLOWED_IMAGE_TYPES`]
    ///
    /// # Returns
    /// The URL or path the image can be retrieved from
    async fn upload(
        &self,
        trade_id: u64,
        filename: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete a previously stored image.
    ///
    /// Returns `false` when the URL does not belong to this store or the
    /// image no longer exists.
    async fn delete(&self, image_url: &str) -> Result<bool, StorageError>;
}
