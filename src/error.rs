//! Error handling for the CV extractor

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, CvExtractError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvExtractError {
    fn from(err: anyhow::Error) -> Self {
        CvExtractError::Processing(err.to_string())
    }
}
