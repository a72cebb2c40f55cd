//! Error handling for the resume matcher

use thiserror::Error;

/// Message carried by the missing-input error, also used as the wire payload.
pub const MISSING_INPUT_MESSAGE: &str = "Resume or JD missing";

#[derive(Error, Debug)]
pub enum ResumeMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Similarity unavailable: {0}")]
    Similarity(String),

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeMatchError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatchError::Server(format!("{:#}", err))
    }
}

impl From<toml::de::Error> for ResumeMatchError {
    fn from(err: toml::de::Error) -> Self {
        ResumeMatchError::Configuration(format!("Failed to parse config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        assert_eq!(ResumeMatchError::MissingInput.to_string(), "Resume or JD missing");
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        let err = anyhow::anyhow!("address in use").context("failed to bind 0.0.0.0:8000");
        let converted: ResumeMatchError = err.into();
        let message = converted.to_string();
        assert!(message.contains("failed to bind"));
        assert!(message.contains("address in use"));
    }
}
