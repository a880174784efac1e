//! Letter Synthesizer — turns a `ResumeRecord` + `JobRecord` pair into
//! formatted letter text via the hosted model, with an optional single tool
//! round-trip.

use std::fmt::Write as _;
use std::time::Duration;

use tracing::info;

use crate::analysis::records::{JobRecord, ResumeRecord};
use crate::letter::prompts::{GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM};
use crate::letter::tools::{execute_tool, tool_definitions};
use crate::llm_client::{ChatMessage, ChatRequest, LlmClient, LlmError, ToolCallPayload};

/// Per-request timeout. A tool round-trip consumes a second timeout of the
/// same size.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(45);

const GENERATION_TEMPERATURE: f32 = 0.7;

/// Progress of the tool round-trip. At most one round: after tool results
/// are appended, the follow-up request declares no tools, so the model must
/// answer in text.
#[derive(Debug)]
enum ToolRound {
    AwaitingModel,
    ExecutingTools(Vec<ToolCallPayload>),
    AwaitingFinalModel,
    Done(String),
}

/// Generates the letter body (no metadata header).
pub async fn synthesize_letter(
    resume: &ResumeRecord,
    job: &JobRecord,
    llm: &LlmClient,
) -> Result<String, LlmError> {
    let prompt = build_generation_prompt(resume, job);
    let mut messages = vec![ChatMessage::system(GENERATION_SYSTEM), ChatMessage::user(prompt)];
    let mut state = ToolRound::AwaitingModel;

    loop {
        state = match state {
            ToolRound::AwaitingModel => {
                let request = ChatRequest::new(messages.clone())
                    .temperature(GENERATION_TEMPERATURE)
                    .tools(tool_definitions())
                    .timeout(GENERATION_TIMEOUT);
                let outcome = llm.complete(&request).await?;

                if outcome.tool_calls().is_empty() {
                    ToolRound::Done(outcome.text().ok_or(LlmError::EmptyContent)?.to_string())
                } else {
                    let calls = outcome.tool_calls().to_vec();
                    messages.push(outcome.message);
                    ToolRound::ExecutingTools(calls)
                }
            }
            ToolRound::ExecutingTools(calls) => {
                for call in &calls {
                    let result = execute_tool(&call.function.name, resume, job);
                    info!("executed tool '{}' locally", call.function.name);
                    messages.push(ChatMessage::tool(
                        call.id.as_str(),
                        call.function.name.as_str(),
                        result,
                    ));
                }
                ToolRound::AwaitingFinalModel
            }
            ToolRound::AwaitingFinalModel => {
                let request = ChatRequest::new(messages.clone())
                    .temperature(GENERATION_TEMPERATURE)
                    .timeout(GENERATION_TIMEOUT);
                let outcome = llm.complete(&request).await?;
                ToolRound::Done(outcome.text().ok_or(LlmError::EmptyContent)?.to_string())
            }
            ToolRound::Done(letter) => return Ok(letter),
        };
    }
}

fn build_generation_prompt(resume: &ResumeRecord, job: &JobRecord) -> String {
    GENERATION_PROMPT_TEMPLATE
        .replace("{name}", or_unknown(&resume.name))
        .replace("{skills}", &resume.skills.join(", "))
        .replace("{experience_count}", &resume.experience.len().to_string())
        .replace("{education}", &format_education(resume))
        .replace("{company}", or_unknown(&job.company_name))
        .replace("{position}", or_unknown(&job.job_title))
        .replace("{required_skills}", &job.required_skills.join(", "))
        .replace("{responsibilities}", &job.key_responsibilities.join(", "))
}

fn format_education(resume: &ResumeRecord) -> String {
    resume
        .education
        .iter()
        .map(|e| format!("{}, {} ({})", e.degree, e.institution, e.year))
        .collect::<Vec<_>>()
        .join("; ")
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Prepends the metadata header to a generated letter.
///
/// Callers must treat failure as recoverable: the generated letter is never
/// discarded over a formatting problem.
pub fn try_add_metadata(
    letter: &str,
    resume: &ResumeRecord,
    job: &JobRecord,
) -> Result<String, std::fmt::Error> {
    let job_title = fallback_if_empty(&job.job_title, "Position");
    let company_name = fallback_if_empty(&job.company_name, "Company");
    let candidate_name = fallback_if_empty(&resume.name, "Candidate");
    let date = chrono::Local::now().format("%B %d, %Y");

    let mut out = String::new();
    writeln!(out, "# Cover Letter for {job_title} at {company_name}")?;
    writeln!(out)?;
    writeln!(out, "**Generated for:** {candidate_name}  ")?;
    writeln!(out, "**Date:** {date}  ")?;
    writeln!(out, "**Position:** {job_title}  ")?;
    writeln!(out, "**Company:** {company_name}")?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    out.push_str(letter);

    Ok(out)
}

fn fallback_if_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::analysis::records::{EducationEntry, ExperienceEntry};
    use crate::llm_client::testing::{text_reply, tool_call_reply, ScriptedBackend};

    fn sample_resume() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2019 - 2024".to_string(),
                description: "Built data pipelines".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "UMN".to_string(),
                year: "2019".to_string(),
            }],
            ..Default::default()
        }
    }

    fn sample_job() -> JobRecord {
        JobRecord {
            company_name: "Acme".to_string(),
            job_title: "Python Engineer".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            key_responsibilities: vec!["Build services".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_generation_prompt_embeds_candidate_and_job() {
        let prompt = build_generation_prompt(&sample_resume(), &sample_job());
        assert!(prompt.contains("Name: Jane Doe"));
        assert!(prompt.contains("Skills: Python, SQL"));
        assert!(prompt.contains("Experience: 1 positions"));
        assert!(prompt.contains("BSc Computer Science, UMN (2019)"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Position: Python Engineer"));
    }

    #[test]
    fn test_generation_prompt_empty_fields_become_na() {
        let prompt = build_generation_prompt(&ResumeRecord::default(), &JobRecord::default());
        assert!(prompt.contains("Name: N/A"));
        assert!(prompt.contains("Company: N/A"));
    }

    #[tokio::test]
    async fn test_synthesize_without_tool_calls_is_single_request() {
        let backend = Arc::new(ScriptedBackend::with_texts(&["Dear Hiring Manager,"]));
        let llm = LlmClient::with_backend(backend.clone());

        let letter = synthesize_letter(&sample_resume(), &sample_job(), &llm)
            .await
            .unwrap();
        assert_eq!(letter, "Dear Hiring Manager,");
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn test_synthesize_with_tool_call_runs_exactly_one_extra_round() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            tool_call_reply("call_1", "analyze_resume_match", "{}"),
            text_reply("Dear Hiring Manager, I am a strong match."),
        ]));
        let llm = LlmClient::with_backend(backend.clone());

        let letter = synthesize_letter(&sample_resume(), &sample_job(), &llm)
            .await
            .unwrap();
        assert_eq!(letter, "Dear Hiring Manager, I am a strong match.");
        assert_eq!(backend.request_count(), 2);

        // First request declares the tools; the follow-up must not, so the
        // round-trip cannot repeat.
        let requests = backend.requests();
        assert_eq!(requests[0].tools.len(), 2);
        assert!(requests[1].tools.is_empty());

        // The conversation fed back to the model carries the tool result.
        let tool_message = requests[1]
            .messages
            .iter()
            .find(|m| m.role == "tool")
            .expect("tool result message present");
        assert_eq!(tool_message.tool_call_id.as_deref(), Some("call_1"));
        assert!(tool_message
            .content
            .as_deref()
            .unwrap()
            .starts_with("Resume match analysis:"));
    }

    #[test]
    fn test_metadata_header_shape() {
        let letter = "Dear Hiring Manager,";
        let full = try_add_metadata(letter, &sample_resume(), &sample_job()).unwrap();
        assert!(full.starts_with("# Cover Letter for Python Engineer at Acme\n"));
        assert!(full.contains("**Generated for:** Jane Doe"));
        assert!(full.contains("**Position:** Python Engineer"));
        assert!(full.contains("---"));
        assert!(full.ends_with(letter));
    }

    #[test]
    fn test_metadata_header_empty_records_use_placeholders() {
        let full = try_add_metadata("body", &ResumeRecord::default(), &JobRecord::default()).unwrap();
        assert!(full.starts_with("# Cover Letter for Position at Company\n"));
        assert!(full.contains("**Generated for:** Candidate"));
    }
}
