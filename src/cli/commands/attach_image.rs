//! Attach-image command implementation.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use journal_config::AppConfig;
use journal_core::traits::{ImageStore, TradeStore};
use journal_core::types::TradeImage;
use journal_data::LocalImageStore;
use std::path::Path;
use tracing::info;

use super::open_journal;
use crate::cli::AttachImageArgs;

pub async fn run(args: AttachImageArgs, config: &AppConfig, images: &LocalImageStore) -> Result<()> {
    let store = open_journal(args.data, config)?;
    if store.get_trade(args.trade_id).await?.is_none() {
        bail!("Trade {} not found in {}", args.trade_id, store.path().display());
    }

    let Some(content_type) = content_type_for(&args.file) else {
        bail!(
            "Unsupported image file '{}'. Use png, jpg, gif or webp",
            args.file.display()
        );
    };
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let filename = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");
    let existing = images.images_for(args.trade_id).await?.len();
    let image_url = images
        .upload(args.trade_id, filename, &content, content_type)
        .await
        .context("Failed to store image")?;

    let image = TradeImage {
        id: existing as u64 + 1,
        trade_id: args.trade_id,
        image_url,
        image_type: args.image_type,
        caption: args.caption.filter(|c| !c.trim().is_empty()),
        created_at: Utc::now(),
    };
    info!(trade_id = image.trade_id, image_type = %image.image_type, "Image attached");
    println!("{}", serde_json::to_string_pretty(&image)?);

    Ok(())
}

/// MIME type inferred from the file extension.
fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
