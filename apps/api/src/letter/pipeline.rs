//! Orchestrator for cover-letter generation.
//!
//! Four stages — Validate → Parse Resume → Analyze Job → Synthesize — each a
//! hard gate: any non-success result short-circuits to a user-facing error
//! string. No partial results are merged forward, and every failure mode
//! terminates in renderable text rather than an unhandled fault.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::job::analyze_job_description;
use crate::analysis::resume::parse_resume;
use crate::letter::synthesizer::{synthesize_letter, try_add_metadata};
use crate::llm_client::LlmClient;
use crate::validation::{detect_file_type, validate_file_size, validate_inputs, FileTypeHint};

/// An uploaded resume: the buffered temp path plus the original filename
/// (the filename drives extension inference, the path drives reads).
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Error,
}

/// The `(content, status)` pair returned to the UI collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResponse {
    pub content: String,
    pub status: PipelineStatus,
}

impl PipelineResponse {
    fn success(content: String) -> Self {
        Self {
            content,
            status: PipelineStatus::Success,
        }
    }

    fn error(content: String) -> Self {
        Self {
            content,
            status: PipelineStatus::Error,
        }
    }
}

/// Runs the full pipeline for one request.
pub async fn process_cover_letter(
    llm: &LlmClient,
    resume: Option<&ResumeUpload>,
    job_description: &str,
    file_type: FileTypeHint,
) -> PipelineResponse {
    // Stage 1: Validate
    if let Err(message) = validate_inputs(resume.map(|r| r.path.as_path()), job_description) {
        return PipelineResponse::error(message);
    }
    let Some(upload) = resume else {
        return PipelineResponse::error("❌ Please upload a resume file.".to_string());
    };

    let kind = detect_file_type(&upload.file_name, file_type);
    info!("processing '{}' as {:?}", upload.file_name, kind);

    // Size gate runs here too so the size-specific message surfaces before
    // any downstream work.
    if let Err(message) = validate_file_size(&upload.path) {
        return PipelineResponse::error(message);
    }

    // Stage 2: Parse resume
    let resume_record = match parse_resume(&upload.path, kind, llm).await {
        Ok(record) => record,
        Err(e) => return PipelineResponse::error(format!("Error parsing resume: {e}")),
    };

    // Stage 3: Analyze job description
    let job_record = match analyze_job_description(job_description, llm).await {
        Ok(record) => record,
        Err(e) => return PipelineResponse::error(format!("Error analyzing job description: {e}")),
    };

    // Stage 4: Synthesize
    let letter = match synthesize_letter(&resume_record, &job_record, llm).await {
        Ok(letter) => letter,
        Err(e) => return PipelineResponse::error(format!("Error generating cover letter: {e}")),
    };

    match try_add_metadata(&letter, &resume_record, &job_record) {
        Ok(content) => {
            info!(
                "generated cover letter for '{}' at '{}'",
                job_record.job_title, job_record.company_name
            );
            PipelineResponse::success(content)
        }
        Err(e) => {
            warn!("failed to finalize cover letter: {e}");
            PipelineResponse::error(finalize_failure_message(&letter, &e))
        }
    }
}

/// The finalize-stage error string keeps the raw generated text so nothing
/// the model produced is lost.
fn finalize_failure_message(letter: &str, error: &dyn std::fmt::Display) -> String {
    format!("Error finalizing cover letter: {error}\n\nGenerated content:\n{letter}")
}
