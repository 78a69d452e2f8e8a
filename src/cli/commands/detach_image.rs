//! Detach-image command implementation.

use anyhow::{bail, Context, Result};
use journal_core::traits::ImageStore;
use journal_data::LocalImageStore;
use tracing::info;

use crate::cli::DetachImageArgs;

pub async fn run(args: DetachImageArgs, images: &LocalImageStore) -> Result<()> {
    let deleted = images
        .delete(&args.image_url)
        .await
        .context("Failed to delete image")?;
    if !deleted {
        bail!(
            "No stored image at '{}' under {}",
            args.image_url,
            images.root().display()
        );
    }

    info!(image_url = %args.image_url, "Image detached");
    println!("Deleted {}", args.image_url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detach_stored_image() {
        let dir = tempfile::tempdir().unwrap();
        let images = LocalImageStore::new(dir.path());
        let image_url = images
            .upload(3, "entry.png", b"\x89PNG", "image/png")
            .await
            .unwrap();

        run(DetachImageArgs { image_url: image_url.clone() }, &images)
            .await
            .unwrap();
        assert!(images.images_for(3).await.unwrap().is_empty());

        let err = run(DetachImageArgs { image_url }, &images).await.unwrap_err();
        assert!(err.to_string().contains("No stored image"));
    }
}
