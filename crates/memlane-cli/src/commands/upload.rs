use std::path::Path;

use anyhow::{Context, Result};
use memlane_core::upload::{upload_or_embed, ImageUploader, ImgbbUploader};
use memlane_core::AppConfig;
use tracing::warn;

pub async fn run(config: &AppConfig, file: &Path) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let uploader = match ImgbbUploader::from_config(&config.upload) {
        Ok(uploader) => uploader,
        Err(e) => {
            warn!("Image host disabled: {}", e);
            None
        }
    };
    if uploader.is_none() {
        eprintln!("No image host configured; printing an embeddable data URL.");
    }

    let reference = upload_or_embed(
        uploader.as_ref().map(|u| u as &dyn ImageUploader),
        &bytes,
    )
    .await
    .with_context(|| format!("Cannot use {} as a memory image", file.display()))?;
    println!("{}", reference);

    Ok(())
}
