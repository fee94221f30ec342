//! Input manager for routing uploaded resumes to an extractor

use crate::error::{CheckerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::{error, info};
use std::path::Path;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Extract resume text, degrading parse failures to an empty string.
    ///
    /// Only an unsupported extension is an error here.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        match self.try_extract_text(path).await {
            Ok(text) => Ok(text),
            Err(CheckerError::UnsupportedFormat(msg)) => Err(CheckerError::UnsupportedFormat(msg)),
            Err(e) => {
                error!("Text extraction failed for {}: {}", path.display(), e);
                Ok(String::new())
            }
        }
    }

    /// Extract resume text, surfacing parse and I/O failures
    pub async fn try_extract_text(&self, path: &Path) -> Result<String> {
        let file_type = Self::detect_file_type(path)?;

        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await
            }
            FileType::Unknown => Err(CheckerError::UnsupportedFormat(format!(
                "Only PDF and DOCX are supported: {}",
                path.display()
            ))),
        }
    }

    pub fn detect_file_type(path: &Path) -> Result<FileType> {
        match FileType::from_path(path) {
            FileType::Unknown => Err(CheckerError::UnsupportedFormat(format!(
                "Only PDF and DOCX are supported: {}",
                path.display()
            ))),
            known => Ok(known),
        }
    }
}
