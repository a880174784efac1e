//! Job-Description Analyzer — extracts a `JobRecord` from posting text.
//!
//! Behavior is identical to the Resume Analyzer apart from schema and
//! system prompt: malformed replies degrade to the fallback record,
//! transport failures surface as explicit errors.

use tracing::{info, warn};

use crate::analysis::prompts::{JOB_ANALYSIS_SYSTEM, JOB_PROMPT_TEMPLATE, JOB_SCHEMA_TEMPLATE};
use crate::analysis::records::JobRecord;
use crate::analysis::{AnalysisError, ANALYSIS_TIMEOUT};
use crate::llm_client::{LlmClient, LlmError};

pub async fn analyze_job_description(
    job_description: &str,
    llm: &LlmClient,
) -> Result<JobRecord, AnalysisError> {
    let prompt = JOB_PROMPT_TEMPLATE
        .replace("{schema}", JOB_SCHEMA_TEMPLATE)
        .replace("{job_description}", job_description);

    match llm
        .call_json::<JobRecord>(&prompt, JOB_ANALYSIS_SYSTEM, ANALYSIS_TIMEOUT)
        .await
    {
        Ok(record) => {
            info!(
                "analyzed job description for '{}' at '{}'",
                record.job_title, record.company_name
            );
            Ok(record)
        }
        Err(LlmError::Parse(e)) => {
            warn!("job analysis reply was not valid JSON ({e}); substituting fallback record");
            Ok(JobRecord::fallback())
        }
        Err(e) => Err(AnalysisError::Llm(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm_client::testing::{FailingBackend, ScriptedBackend};

    const JOB_TEXT: &str = "Seeking a Python engineer with SQL skills";

    #[tokio::test]
    async fn test_analyze_job_description_returns_structured_record() {
        let reply = r#"{"company_name": "Acme", "job_title": "Python Engineer", "required_skills": ["Python", "SQL"]}"#;
        let llm = LlmClient::with_backend(Arc::new(ScriptedBackend::with_texts(&[reply])));

        let record = analyze_job_description(JOB_TEXT, &llm).await.unwrap();
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.required_skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_analyze_job_description_malformed_reply_yields_fallback() {
        let llm = LlmClient::with_backend(Arc::new(ScriptedBackend::with_texts(&[
            "Sure! Here is the JSON you asked for:",
        ])));

        let record = analyze_job_description(JOB_TEXT, &llm).await.unwrap();
        assert_eq!(record, JobRecord::fallback());
    }

    #[tokio::test]
    async fn test_analyze_job_description_transport_failure_is_an_error() {
        let llm = LlmClient::with_backend(Arc::new(FailingBackend {
            status: 503,
            message: "service unavailable".to_string(),
        }));

        let err = analyze_job_description(JOB_TEXT, &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Llm(LlmError::Api { status: 503, .. })));
    }
}
