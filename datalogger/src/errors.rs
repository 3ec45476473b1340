use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Sensor error: {0}")]
    Sensor(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
