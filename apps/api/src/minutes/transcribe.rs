//! Audio transcription via the hosted speech-to-text endpoint.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// The transcription model. Hardcoded for the same reason as the chat model.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("audio file not found: {0}")]
    NotFound(String),

    #[error("could not read audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Transcription transport seam. Production uses `WhisperTranscriber`;
/// tests inject canned transcripts.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, path: &Path) -> Result<String, TranscriptionError>;
}

/// Production transcriber posting multipart audio to the hosted endpoint.
pub struct WhisperTranscriber {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WhisperTranscriber {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<String, TranscriptionError> {
        if !path.exists() {
            return Err(TranscriptionError::NotFound(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();

        info!("transcribing '{}' ({} bytes)", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "text");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

/// Basic upload validation: `.mp3` extension, file exists, nonzero size.
pub fn validate_audio_file(path: &Path) -> bool {
    let is_mp3 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false);
    if !is_mp3 {
        return false;
    }

    match std::fs::metadata(path) {
        Ok(metadata) => metadata.len() > 0,
        Err(_) => false,
    }
}

/// Rough duration estimate: 1 MiB of MP3 is about one minute of audio.
pub fn estimate_duration_secs(path: &Path) -> Option<f64> {
    let size_mb = std::fs::metadata(path).ok()?.len() as f64 / (1024.0 * 1024.0);
    Some(size_mb * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_mp3(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_validate_audio_file_accepts_nonempty_mp3() {
        let file = temp_mp3(b"ID3 fake mp3 payload");
        assert!(validate_audio_file(file.path()));
    }

    #[test]
    fn test_validate_audio_file_rejects_wrong_extension() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF").unwrap();
        assert!(!validate_audio_file(file.path()));
    }

    #[test]
    fn test_validate_audio_file_rejects_missing_file() {
        assert!(!validate_audio_file(Path::new("/no/such/meeting.mp3")));
    }

    #[test]
    fn test_validate_audio_file_rejects_empty_file() {
        let file = temp_mp3(b"");
        assert!(!validate_audio_file(file.path()));
    }

    #[test]
    fn test_estimate_duration_scales_with_size() {
        let file = temp_mp3(&vec![0u8; 1024 * 1024]);
        let duration = estimate_duration_secs(file.path()).unwrap();
        assert!((duration - 60.0).abs() < 1.0);
    }

    #[test]
    fn test_estimate_duration_missing_file_is_none() {
        assert!(estimate_duration_secs(Path::new("/no/such/meeting.mp3")).is_none());
    }
}
