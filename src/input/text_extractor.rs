//! Text extraction from uploaded resume formats

use crate::error::{CheckerError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(CheckerError::Io)?;
        let display = path.display().to_string();

        // pdf-extract panics on some malformed documents; the blocking task contains it
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                CheckerError::Extraction(format!("PDF parser aborted on '{}': {}", display, e))
            })?
            .map_err(|e| {
                CheckerError::Extraction(format!(
                    "Failed to extract text from PDF '{}': {}",
                    display, e
                ))
            })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(CheckerError::Io)?;
        let display = path.display().to_string();

        let paragraphs = tokio::task::spawn_blocking(move || Self::read_paragraphs(bytes))
            .await
            .map_err(|e| {
                CheckerError::Extraction(format!("DOCX parser aborted on '{}': {}", display, e))
            })?
            .map_err(|e| match e {
                CheckerError::Extraction(msg) => CheckerError::Extraction(format!(
                    "Failed to extract text from DOCX '{}': {}",
                    display, msg
                )),
                other => other,
            })?;

        Ok(paragraphs.join(" "))
    }
}

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    fn read_paragraphs(bytes: Vec<u8>) -> Result<Vec<String>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| CheckerError::Extraction(format!("not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(Self::DOCUMENT_PART)
            .map_err(|e| {
                CheckerError::Extraction(format!("missing {}: {}", Self::DOCUMENT_PART, e))
            })?
            .read_to_string(&mut xml)
            .map_err(|e| {
                CheckerError::Extraction(format!("unreadable {}: {}", Self::DOCUMENT_PART, e))
            })?;

        Self::paragraphs_from_xml(&xml)
    }

    /// Body paragraphs in document order; paragraphs inside tables are skipped
    pub(crate) fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut paragraph_depth = 0usize;
        let mut table_depth = 0usize;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"p" => paragraph_depth += 1,
                    b"tbl" => table_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"p" => {
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                        if paragraph_depth == 0 {
                            if table_depth == 0 {
                                paragraphs.push(std::mem::take(&mut current));
                            } else {
                                current.clear();
                            }
                        }
                    }
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"p" if paragraph_depth == 0 && table_depth == 0 => {
                        paragraphs.push(String::new())
                    }
                    b"tab" if paragraph_depth > 0 => current.push('\t'),
                    b"br" | b"cr" if paragraph_depth > 0 => current.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text && paragraph_depth > 0 => {
                    let text = t
                        .unescape()
                        .map_err(|e| CheckerError::Extraction(format!("bad text node: {}", e)))?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(CheckerError::Extraction(format!(
                        "malformed XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Smith</w:t></w:r></w:p>
    <w:p/>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inside table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>Engineer</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraphs_follow_body_order() {
        let paragraphs = DocxExtractor::paragraphs_from_xml(BODY).unwrap();
        assert_eq!(
            paragraphs,
            vec!["Jane Smith".to_string(), String::new(), "R&D\tEngineer".to_string()]
        );
    }

    #[test]
    fn test_malformed_xml_is_extraction_error() {
        let result = DocxExtractor::paragraphs_from_xml("<w:p><w:t>open</w:p>");
        assert!(matches!(result, Err(CheckerError::Extraction(_))));
    }

    #[test]
    fn test_non_zip_bytes_rejected() {
        let result = DocxExtractor::read_paragraphs(b"plain text, not an archive".to_vec());
        assert!(matches!(result, Err(CheckerError::Extraction(_))));
    }
}
