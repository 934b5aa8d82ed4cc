//! Error handling for the role matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid role profile: {0}")]
    InvalidProfile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, RoleMatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for RoleMatcherError {
    fn from(err: anyhow::Error) -> Self {
        RoleMatcherError::Processing(err.to_string())
    }
}

impl From<std::fmt::Error> for RoleMatcherError {
    fn from(err: std::fmt::Error) -> Self {
        RoleMatcherError::OutputFormatting(err.to_string())
    }
}

impl From<regex::Error> for RoleMatcherError {
    fn from(err: regex::Error) -> Self {
        RoleMatcherError::Processing(format!("Invalid pattern: {}", err))
    }
}
