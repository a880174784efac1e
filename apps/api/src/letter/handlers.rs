//! Axum route handler for cover-letter generation.

use std::io::Write;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::Json;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::letter::pipeline::{process_cover_letter, PipelineResponse, PipelineStatus, ResumeUpload};
use crate::state::AppState;
use crate::validation::FileTypeHint;

/// Wrapping alarm around the whole pipeline: converts a stuck outbound call
/// into a timeout error string instead of hanging the request.
const PIPELINE_ALARM: Duration = Duration::from_secs(90);

/// POST /api/v1/cover-letter
///
/// Multipart form: `resume` (file), `job_description` (text), optional
/// `file_type` ("auto" | "pdf" | "docx" | "text", default "auto").
///
/// Always replies 200 with a `(content, status)` body for pipeline outcomes;
/// only malformed multipart payloads surface as HTTP errors.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineResponse>, AppError> {
    let mut resume: Option<ResumeUpload> = None;
    let mut job_description = String::new();
    let mut file_type = FileTypeHint::Auto;
    // Keeps the buffered upload alive until the pipeline finishes.
    let mut upload_guard: Option<NamedTempFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        match field.name().unwrap_or("") {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let bytes: bytes::Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read resume upload: {e}")))?;

                let mut file = NamedTempFile::new()
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("temp file: {e}")))?;
                file.write_all(&bytes)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("buffering upload: {e}")))?;

                resume = Some(ResumeUpload {
                    path: file.path().to_path_buf(),
                    file_name,
                });
                upload_guard = Some(file);
            }
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read job description: {e}")))?;
            }
            "file_type" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read file type: {e}")))?;
                file_type = raw.parse().map_err(AppError::Validation)?;
            }
            other => {
                debug!("ignoring unknown multipart field '{other}'");
            }
        }
    }

    let pipeline = process_cover_letter(&state.llm, resume.as_ref(), &job_description, file_type);
    let response = match tokio::time::timeout(PIPELINE_ALARM, pipeline).await {
        Ok(response) => response,
        Err(_) => {
            warn!("cover-letter pipeline exceeded {}s alarm", PIPELINE_ALARM.as_secs());
            PipelineResponse {
                content: format!(
                    "Error generating cover letter: request timed out after {} seconds",
                    PIPELINE_ALARM.as_secs()
                ),
                status: PipelineStatus::Error,
            }
        }
    };

    drop(upload_guard);
    Ok(Json(response))
}
