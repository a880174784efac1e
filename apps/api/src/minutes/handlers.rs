//! Axum route handler for meeting-minutes generation.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::letter::pipeline::{PipelineResponse, PipelineStatus};
use crate::minutes::analyzer::{analyze_meeting, format_meeting_minutes};
use crate::minutes::transcribe::{estimate_duration_secs, validate_audio_file};
use crate::state::AppState;

/// POST /api/v1/meeting-minutes
///
/// Multipart form: `audio` (MP3 file), optional `meeting_title`, optional
/// `participants`. Same `(content, status)` reply contract as the
/// cover-letter endpoint.
pub async fn handle_generate_minutes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineResponse>, AppError> {
    let mut audio: Option<tempfile::NamedTempFile> = None;
    let mut meeting_title = String::new();
    let mut participants = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        match field.name().unwrap_or("") {
            "audio" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes: bytes::Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read audio upload: {e}")))?;

                // Buffer under the original extension so validation sees it.
                let suffix = match file_name.rsplit_once('.') {
                    Some((_, ext)) => format!(".{ext}"),
                    None => String::new(),
                };
                let mut file = tempfile::Builder::new()
                    .suffix(&suffix)
                    .tempfile()
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("temp file: {e}")))?;
                file.write_all(&bytes)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("buffering upload: {e}")))?;
                audio = Some(file);
            }
            "meeting_title" => {
                meeting_title = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read meeting title: {e}")))?;
            }
            "participants" => {
                participants = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read participants: {e}")))?;
            }
            other => {
                debug!("ignoring unknown multipart field '{other}'");
            }
        }
    }

    let audio = match audio {
        Some(file) if validate_audio_file(file.path()) => file,
        _ => {
            return Ok(Json(PipelineResponse {
                content: "❌ Please upload an MP3 audio file.".to_string(),
                status: PipelineStatus::Error,
            }))
        }
    };

    if let Some(duration) = estimate_duration_secs(audio.path()) {
        info!("estimated audio duration: {duration:.0}s");
    }

    let transcription = match state.transcriber.transcribe(audio.path()).await {
        Ok(text) => text,
        Err(e) => {
            return Ok(Json(PipelineResponse {
                content: format!("Error transcribing audio: {e}"),
                status: PipelineStatus::Error,
            }))
        }
    };

    let (summary, action_items) =
        analyze_meeting(&state.llm, &transcription, &meeting_title, &participants).await;
    let document = format_meeting_minutes(&summary, &action_items, &meeting_title, &participants);

    Ok(Json(PipelineResponse {
        content: document,
        status: PipelineStatus::Success,
    }))
}
