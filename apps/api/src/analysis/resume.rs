//! Resume Analyzer — extracts a `ResumeRecord` from an uploaded document.

use std::path::Path;

use tracing::{info, warn};

use crate::analysis::prompts::{RESUME_ANALYSIS_SYSTEM, RESUME_PROMPT_TEMPLATE, RESUME_SCHEMA_TEMPLATE};
use crate::analysis::records::ResumeRecord;
use crate::analysis::{AnalysisError, ANALYSIS_TIMEOUT};
use crate::extraction::{extract_text, FileKind};
use crate::llm_client::{LlmClient, LlmError};

/// Parses a resume file into a structured record.
///
/// Size gate and truncation happen in extraction; the model reply is parsed
/// as JSON. A malformed reply degrades to `ResumeRecord::fallback()` so the
/// caller always has something renderable; transport failures are surfaced
/// as `AnalysisError::Llm`.
pub async fn parse_resume(
    path: &Path,
    kind: FileKind,
    llm: &LlmClient,
) -> Result<ResumeRecord, AnalysisError> {
    let resume_text = extract_text(path, kind)?;
    info!("extracted {} characters of resume text", resume_text.chars().count());

    let prompt = RESUME_PROMPT_TEMPLATE
        .replace("{schema}", RESUME_SCHEMA_TEMPLATE)
        .replace("{resume_text}", &resume_text);

    match llm
        .call_json::<ResumeRecord>(&prompt, RESUME_ANALYSIS_SYSTEM, ANALYSIS_TIMEOUT)
        .await
    {
        Ok(record) => {
            info!("parsed resume for candidate '{}'", record.name);
            Ok(record)
        }
        Err(LlmError::Parse(e)) => {
            warn!("resume reply was not valid JSON ({e}); substituting fallback record");
            Ok(ResumeRecord::fallback())
        }
        Err(e) => Err(AnalysisError::Llm(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use crate::llm_client::testing::{FailingBackend, ScriptedBackend};

    fn temp_resume() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Name: Jane Doe\nSkills: Python, SQL").unwrap();
        file
    }

    #[tokio::test]
    async fn test_parse_resume_returns_structured_record() {
        let reply = "```json\n{\"name\": \"Jane Doe\", \"skills\": [\"Python\", \"SQL\"]}\n```";
        let llm = LlmClient::with_backend(Arc::new(ScriptedBackend::with_texts(&[reply])));

        let file = temp_resume();
        let record = parse_resume(file.path(), FileKind::Text, &llm).await.unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_parse_resume_malformed_reply_yields_fallback() {
        let llm = LlmClient::with_backend(Arc::new(ScriptedBackend::with_texts(&[
            "this is not json at all",
        ])));

        let file = temp_resume();
        let record = parse_resume(file.path(), FileKind::Text, &llm).await.unwrap();
        assert_eq!(record, ResumeRecord::fallback());
    }

    #[tokio::test]
    async fn test_parse_resume_transport_failure_is_an_error() {
        let llm = LlmClient::with_backend(Arc::new(FailingBackend {
            status: 401,
            message: "invalid api key".to_string(),
        }));

        let file = temp_resume();
        let err = parse_resume(file.path(), FileKind::Text, &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Llm(LlmError::Api { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_parse_resume_missing_file_is_extraction_error() {
        let llm = LlmClient::with_backend(Arc::new(ScriptedBackend::with_texts(&["{}"])));

        let err = parse_resume(Path::new("/no/such/resume.txt"), FileKind::Text, &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Extraction(_)));
    }
}
