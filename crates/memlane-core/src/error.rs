use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid memory: {0}")]
    Validation(String),

    #[error("Image upload error: {0}")]
    Upload(String),

    #[error("Not an image: {0} (expected JPEG, PNG, GIF or WebP)")]
    NotAnImage(String),

    #[error("Memory not found: {0}")]
    MemoryNotFound(i64),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
