//! PDF text extraction.
//!
//! Wraps `pdf-extract` and normalizes the result: all whitespace runs
//! collapse to single spaces so downstream character-window chunking sees a
//! stable, layout-free text stream.

use thiserror::Error;

/// Documents with fewer extractable characters than this are rejected as
/// scanned/image-only or corrupted.
const MIN_TEXT_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0} (only PDF is accepted)")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("document contains no extractable text (scanned or corrupted PDF?)")]
    EmptyDocument,
}

/// Result of extracting text from an uploaded document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// Normalized full text.
    pub text: String,
}

impl ExtractedDocument {
    pub fn total_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collapse all whitespace runs (newlines included) to single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract text from PDF bytes.
///
/// Fails with [`ExtractionError::UnsupportedType`] for non-PDF filenames,
/// [`ExtractionError::PdfError`] when the bytes are not a parseable PDF, and
/// [`ExtractionError::EmptyDocument`] when the PDF yields no usable text.
pub fn extract_document(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if ext != "pdf" {
        return Err(ExtractionError::UnsupportedType(ext));
    }

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let text = normalize_whitespace(&raw);
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(ExtractionError::EmptyDocument);
    }

    tracing::debug!("Extracted '{}': {} chars", filename, text.chars().count());

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        text,
    })
}
