use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::ImageUploader;
use crate::config::UploadConfig;
use crate::{Error, Result};

#[derive(Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
    error: Option<ImgbbError>,
}

#[derive(Deserialize)]
struct ImgbbData {
    display_url: String,
}

#[derive(Deserialize)]
struct ImgbbError {
    message: String,
}

/// ImgBB image hosting
pub struct ImgbbUploader {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl ImgbbUploader {
    pub fn new(api_key: &str, endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid upload endpoint '{}': {}", endpoint, e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Uploader for the configured key, or `None` when no key is set
    pub fn from_config(config: &UploadConfig) -> Result<Option<Self>> {
        match config.api_key() {
            Some(key) => Self::new(&key, &config.endpoint, config.timeout_secs).map(Some),
            None => Ok(None),
        }
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

#[async_trait::async_trait]
impl ImageUploader for ImgbbUploader {
    fn name(&self) -> &str {
        "imgbb"
    }

    async fn upload(&self, bytes: &[u8]) -> Result<String> {
        let payload = STANDARD.encode(bytes);

        let response = self
            .client
            .post(self.request_url())
            .form(&[("image", payload.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body: ImgbbResponse = response
            .json()
            .await
            .map_err(|e| Error::Upload(format!("Failed to parse ImgBB response: {}", e)))?;

        if !status.is_success() || !body.success {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(Error::Upload(message));
        }

        body.data
            .map(|d| d.display_url)
            .ok_or_else(|| Error::Upload("ImgBB response has no image URL".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_carries_key() {
        let uploader = ImgbbUploader::new("secret", "https://api.imgbb.com/1/upload", 5).unwrap();
        assert_eq!(
            uploader.request_url().as_str(),
            "https://api.imgbb.com/1/upload?key=secret"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        assert!(matches!(
            ImgbbUploader::new("k", "not a url", 5),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_response_parsing() {
        let ok: ImgbbResponse = serde_json::from_str(
            r#"{"data":{"id":"x","display_url":"https://i.ibb.co/x/a.png"},"success":true,"status":200}"#,
        )
        .unwrap();
        assert!(ok.success);
        assert_eq!(ok.data.unwrap().display_url, "https://i.ibb.co/x/a.png");

        let err: ImgbbResponse = serde_json::from_str(
            r#"{"status_code":400,"error":{"message":"Invalid API v1 key.","code":100},"status_txt":"Bad Request"}"#,
        )
        .unwrap();
        assert!(!err.success);
        assert_eq!(err.error.unwrap().message, "Invalid API v1 key.");
    }
}
