//! Meeting analysis — summary and action-item extraction over a transcript,
//! plus the minutes document formatter.

use std::time::Duration;

use tracing::warn;

use crate::llm_client::{ChatMessage, ChatRequest, LlmClient, LlmError};
use crate::minutes::prompts::{ACTION_ITEMS_SYSTEM, SUMMARY_SYSTEM};

const SUMMARY_MAX_TOKENS: u32 = 2000;
const ACTION_ITEMS_MAX_TOKENS: u32 = 1500;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(45);

/// Runs both analysis calls over the transcription.
///
/// Each call degrades independently to an error string in its own section;
/// one failed call never blanks the other section.
pub async fn analyze_meeting(
    llm: &LlmClient,
    transcription: &str,
    meeting_title: &str,
    participants: &str,
) -> (String, String) {
    let summary = generate_summary(llm, transcription, meeting_title, participants)
        .await
        .unwrap_or_else(|e| {
            warn!("meeting summary call failed: {e}");
            format!("Error generating summary: {e}")
        });

    let action_items = extract_action_items(llm, transcription, participants)
        .await
        .unwrap_or_else(|e| {
            warn!("action-item call failed: {e}");
            format!("Error extracting action items: {e}")
        });

    (summary, action_items)
}

async fn generate_summary(
    llm: &LlmClient,
    transcription: &str,
    meeting_title: &str,
    participants: &str,
) -> Result<String, LlmError> {
    let context = format!(
        "Meeting Title: {}\nParticipants: {}\n\nMeeting Transcription:\n{}",
        or_not_specified(meeting_title),
        or_not_specified(participants),
        transcription
    );

    run_analysis_call(llm, SUMMARY_SYSTEM, &context, SUMMARY_MAX_TOKENS).await
}

async fn extract_action_items(
    llm: &LlmClient,
    transcription: &str,
    participants: &str,
) -> Result<String, LlmError> {
    let context = format!(
        "Participants: {}\n\nMeeting Transcription:\n{}",
        or_not_specified(participants),
        transcription
    );

    run_analysis_call(llm, ACTION_ITEMS_SYSTEM, &context, ACTION_ITEMS_MAX_TOKENS).await
}

async fn run_analysis_call(
    llm: &LlmClient,
    system: &str,
    context: &str,
    max_tokens: u32,
) -> Result<String, LlmError> {
    let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(context)])
        .temperature(ANALYSIS_TEMPERATURE)
        .max_tokens(max_tokens)
        .timeout(ANALYSIS_TIMEOUT);

    let outcome = llm.complete(&request).await?;
    Ok(outcome.text().ok_or(LlmError::EmptyContent)?.to_string())
}

/// Formats the complete minutes document.
pub fn format_meeting_minutes(
    summary: &str,
    action_items: &str,
    meeting_title: &str,
    participants: &str,
) -> String {
    let date = chrono::Local::now().format("%B %d, %Y");
    let title = if meeting_title.trim().is_empty() {
        "Untitled Meeting"
    } else {
        meeting_title
    };

    format!(
        "# Meeting Minutes\n\n\
         **Date:** {date}\n\
         **Meeting:** {title}\n\
         **Participants:** {}\n\n\
         ---\n\n\
         ## Meeting Summary\n\n\
         {summary}\n\n\
         ---\n\n\
         ## Action Items & Next Steps\n\n\
         {action_items}\n\n\
         ---\n\n\
         *Generated by Meeting Minutes Generator*",
        or_not_specified(participants)
    )
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm_client::testing::{FailingBackend, ScriptedBackend};

    const TRANSCRIPT: &str = "Alice: ship the report by Friday. Bob: agreed.";

    #[tokio::test]
    async fn test_analyze_meeting_produces_both_sections() {
        let backend = Arc::new(ScriptedBackend::with_texts(&[
            "Summary: the report ships Friday.",
            "Action items: Alice ships the report by Friday.",
        ]));
        let llm = LlmClient::with_backend(backend.clone());

        let (summary, action_items) = analyze_meeting(&llm, TRANSCRIPT, "Weekly sync", "Alice, Bob").await;
        assert_eq!(summary, "Summary: the report ships Friday.");
        assert!(action_items.starts_with("Action items:"));
        assert_eq!(backend.request_count(), 2);

        // Each call carries its own max_tokens limit.
        let requests = backend.requests();
        assert_eq!(requests[0].max_tokens, Some(SUMMARY_MAX_TOKENS));
        assert_eq!(requests[1].max_tokens, Some(ACTION_ITEMS_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_summary_failure_degrades_to_error_string() {
        let llm = LlmClient::with_backend(Arc::new(FailingBackend {
            status: 500,
            message: "backend down".to_string(),
        }));

        let (summary, action_items) = analyze_meeting(&llm, TRANSCRIPT, "", "").await;
        assert!(summary.starts_with("Error generating summary:"));
        assert!(action_items.starts_with("Error extracting action items:"));
    }

    #[test]
    fn test_format_minutes_uses_defaults() {
        let doc = format_meeting_minutes("the summary", "the items", "", "");
        assert!(doc.starts_with("# Meeting Minutes"));
        assert!(doc.contains("**Meeting:** Untitled Meeting"));
        assert!(doc.contains("**Participants:** Not specified"));
        assert!(doc.contains("## Meeting Summary\n\nthe summary"));
        assert!(doc.contains("## Action Items & Next Steps\n\nthe items"));
    }

    #[test]
    fn test_format_minutes_embeds_title_and_participants() {
        let doc = format_meeting_minutes("s", "a", "Weekly sync", "Alice, Bob");
        assert!(doc.contains("**Meeting:** Weekly sync"));
        assert!(doc.contains("**Participants:** Alice, Bob"));
    }
}
