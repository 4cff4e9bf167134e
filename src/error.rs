// Photomark Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotomarkError {
    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Font load error: {0}")]
    FontLoad(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Save error: {0}")]
    Save(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PhotomarkError {
    fn from(err: anyhow::Error) -> Self {
        PhotomarkError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PhotomarkError>;
