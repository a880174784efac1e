//! Text Extraction — bounded plain-text recovery from uploaded resume files.
//!
//! Supports PDF (pdf-extract), DOCX (docx-lite), and plain text. Input size
//! and extracted length are both capped so a pathological upload cannot
//! inflate downstream model cost.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Uploads above this size are rejected before any decode work.
pub const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Extracted text beyond this many characters is truncated.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Resolved type of an uploaded resume file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file is too large ({size} bytes, maximum {MAX_FILE_SIZE_BYTES})")]
    TooLarge { size: u64 },

    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not extract text from PDF: {0}")]
    Pdf(String),

    #[error("could not extract text from DOCX: {0}")]
    Docx(String),
}

/// Extracts the text content of `path` according to `kind`.
///
/// The 2 MiB size gate runs first; the extracted text is truncated to
/// `MAX_TEXT_CHARS` with a trailing ellipsis.
pub fn extract_text(path: &Path, kind: FileKind) -> Result<String, ExtractionError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ExtractionError::TooLarge { size });
    }

    let text = match kind {
        FileKind::Pdf => extract_pdf_text(path)?,
        FileKind::Docx => extract_docx_text(path)?,
        FileKind::Text => {
            let bytes = std::fs::read(path)?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };

    Ok(truncate_text(text))
}

fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx_text(path: &Path) -> Result<String, ExtractionError> {
    docx_lite::extract_text(path).map_err(|e| ExtractionError::Docx(e.to_string()))
}

/// Caps extracted text at `MAX_TEXT_CHARS` characters, marking the cut
/// with an ellipsis.
fn truncate_text(text: String) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text;
    }

    warn!("extracted text truncated to {MAX_TEXT_CHARS} characters");
    let mut truncated: String = text.chars().take(MAX_TEXT_CHARS).collect();
    truncated.push_str("...");
    truncated
}
