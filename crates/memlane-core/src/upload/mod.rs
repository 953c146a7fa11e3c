mod imgbb;

pub use imgbb::ImgbbUploader;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageFormat;
use tracing::{info, warn};

use crate::{Error, Result};

/// Hosts an image and returns its public URL
#[async_trait::async_trait]
pub trait ImageUploader: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    async fn upload(&self, bytes: &[u8]) -> Result<String>;
}

/// Mime type of a supported picture, sniffed from its leading bytes
pub fn image_mime(bytes: &[u8]) -> Result<&'static str> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP)) => {
            Ok(format.to_mime_type())
        }
        Ok(format) => Err(Error::NotAnImage(format!("{:?} files are not supported", format))),
        Err(_) => Err(Error::NotAnImage("unrecognised file contents".to_string())),
    }
}

/// Embed `bytes` as a `data:image/...` URL
pub fn data_url(bytes: &[u8]) -> Result<String> {
    let mime = image_mime(bytes)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Strip a `data:image/<type>;base64,` prefix, leaving the payload
pub fn strip_data_url_prefix(value: &str) -> &str {
    value
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .filter(|(kind, _)| !kind.is_empty() && kind.chars().all(|c| c.is_alphanumeric() || c == '_'))
        .map(|(_, payload)| payload)
        .unwrap_or(value)
}

/// Host the image if an uploader is available, otherwise (or on failure)
/// embed it. Only fails for bytes that are not a supported picture, and
/// those never reach the uploader.
pub async fn upload_or_embed(uploader: Option<&dyn ImageUploader>, bytes: &[u8]) -> Result<String> {
    image_mime(bytes)?;

    let Some(uploader) = uploader else {
        info!("No image host configured, embedding image as data URL");
        return data_url(bytes);
    };

    match uploader.upload(bytes).await {
        Ok(url) => {
            info!("Uploaded image via {}: {}", uploader.name(), url);
            Ok(url)
        }
        Err(e) => {
            warn!("Image upload via {} failed, embedding instead: {}", uploader.name(), e);
            data_url(bytes)
        }
    }
}
