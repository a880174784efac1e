use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::minutes::transcribe::Transcriber;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is immutable per request — no state crosses
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable speech-to-text transport. Production: `WhisperTranscriber`.
    pub transcriber: Arc<dyn Transcriber>,
}
