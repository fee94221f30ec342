//! Error handling for the resume checker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Similarity query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CheckerError>;

/// Convert CSV reader errors into corpus load failures
impl From<csv::Error> for CheckerError {
    fn from(err: csv::Error) -> Self {
        CheckerError::CorpusLoad(err.to_string())
    }
}

/// Convert HTTP client errors into network failures
impl From<reqwest::Error> for CheckerError {
    fn from(err: reqwest::Error) -> Self {
        CheckerError::Network(err.to_string())
    }
}
