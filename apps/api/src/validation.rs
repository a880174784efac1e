//! Input validation for the cover-letter pipeline.
//!
//! The messages here are part of the observable contract with the UI
//! collaborator and must not be reworded.

use std::path::Path;
use std::str::FromStr;

use crate::extraction::{FileKind, MAX_FILE_SIZE_BYTES};

/// Caller-declared file type. `Auto` defers to extension inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileTypeHint {
    #[default]
    Auto,
    Pdf,
    Docx,
    Text,
}

impl FromStr for FileTypeHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(FileTypeHint::Auto),
            "pdf" => Ok(FileTypeHint::Pdf),
            "docx" | "doc" => Ok(FileTypeHint::Docx),
            "text" | "txt" => Ok(FileTypeHint::Text),
            other => Err(format!("unknown file type '{other}'")),
        }
    }
}

/// Validates user inputs before the pipeline starts.
/// Returns the user-facing message on rejection.
pub fn validate_inputs(resume_file: Option<&Path>, job_description: &str) -> Result<(), String> {
    if resume_file.is_none() {
        return Err("❌ Please upload a resume file.".to_string());
    }

    if job_description.trim().is_empty() {
        return Err("❌ Please provide a job description.".to_string());
    }

    Ok(())
}

/// Resolves the file type of an uploaded resume.
/// An explicit caller-specified type always overrides inference.
pub fn detect_file_type(file_name: &str, hint: FileTypeHint) -> FileKind {
    match hint {
        FileTypeHint::Pdf => return FileKind::Pdf,
        FileTypeHint::Docx => return FileKind::Docx,
        FileTypeHint::Text => return FileKind::Text,
        FileTypeHint::Auto => {}
    }

    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        FileKind::Pdf
    } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
        FileKind::Docx
    } else {
        FileKind::Text
    }
}

/// Validates that the uploaded file is within the 2 MiB limit.
///
/// The orchestrator runs this gate before invoking downstream work so it can
/// surface a size-specific message; the extractor re-checks independently.
pub fn validate_file_size(path: &Path) -> Result<(), String> {
    let size = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(_) => return Err("❌ Could not read file size".to_string()),
    };

    let size_mb = size as f64 / (1024.0 * 1024.0);
    let max_mb = MAX_FILE_SIZE_BYTES as f64 / (1024.0 * 1024.0);
    if size > MAX_FILE_SIZE_BYTES {
        return Err(format!(
            "❌ File too large ({size_mb:.1}MB). Maximum size: {max_mb:.0}MB"
        ));
    }

    Ok(())
}
