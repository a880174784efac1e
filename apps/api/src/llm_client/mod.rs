/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completions API directly.
/// All chat interactions MUST go through this module.
///
/// Model: gpt-4o-mini (hardcoded — do not make configurable to prevent drift)
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[cfg(test)]
pub mod testing;

/// The model used for all chat calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o-mini";

/// Near-deterministic temperature for structured-data requests.
pub const STRUCTURED_TEMPERATURE: f32 = 0.1;

/// Timeout applied when a caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// A single conversation message in the completions wire format.
/// Assistant messages may carry tool calls; tool messages carry the
/// originating call id and function name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// A tool-result message answering one tool call from the model.
    pub fn tool(call_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
            name: Some(name.into()),
        }
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments exactly as the model produced them.
    pub arguments: String,
}

/// A callable tool declared to the model.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's parameters.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn to_wire_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// One outbound chat request. The model identifier is fixed (`MODEL`);
/// callers choose messages, sampling, tools, and the per-request timeout.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub tools: Vec<ToolDefinition>,
    pub timeout: Duration,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            tools: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The model's reply to one chat request.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub message: ChatMessage,
    pub usage: Option<Usage>,
}

impl ChatOutcome {
    /// The text content of the reply, if any.
    pub fn text(&self) -> Option<&str> {
        self.message.content.as_deref()
    }

    /// Tool calls requested by the model (empty when the reply is plain text).
    pub fn tool_calls(&self) -> &[ToolCallPayload] {
        self.message.tool_calls.as_deref().unwrap_or(&[])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

/// The chat transport seam. Production uses `OpenAiBackend`; tests inject
/// scripted backends so no network or env mutation is needed.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError>;
}

/// Production backend for the hosted completions endpoint.
///
/// No retries: a single failed call surfaces immediately as an error.
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError> {
        let tools: Option<Vec<serde_json::Value>> = if request.tools.is_empty() {
            None
        } else {
            Some(request.tools.iter().map(|t| t.to_wire_format()).collect())
        };

        let body = WireRequest {
            model: MODEL,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            // Tool selection is left to the model when tools are declared.
            tool_choice: tools.as_ref().map(|_| "auto"),
            tools,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: WireResponse = response.json().await?;
        let choice = wire.choices.into_iter().next().ok_or(LlmError::EmptyContent)?;

        Ok(ChatOutcome {
            message: choice.message,
            usage: wire.usage,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services.
/// Wraps the completions API with a JSON-mode helper for structured output.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn ChatBackend>,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            backend: Arc::new(OpenAiBackend::new(config)),
        }
    }

    /// Builds a client over an injected transport. Used by tests.
    pub fn with_backend(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Sends one chat request and returns the model's reply.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError> {
        let outcome = self.backend.complete(request).await?;

        if let Some(usage) = &outcome.usage {
            debug!(
                "chat completion: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(outcome)
    }

    /// Calls the model in near-deterministic mode and deserializes the text
    /// reply as JSON. The prompt must instruct the model to return valid JSON.
    ///
    /// Parse failures are reported as `LlmError::Parse` so callers can apply
    /// their own fallback policy; transport failures keep their own variants.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        timeout: Duration,
    ) -> Result<T, LlmError> {
        let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(prompt)])
            .temperature(STRUCTURED_TEMPERATURE)
            .timeout(timeout);

        let outcome = self.complete(&request).await?;
        let text = outcome.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start();
            if let Some(rest) = text.strip_suffix("```") {
                text = rest.trim_end();
            }
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_tool_message_carries_call_id_and_name() {
        let msg = ChatMessage::tool("call_42", "analyze_resume_match", "3 skills align");
        assert_eq!(msg.role, "tool");
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_42"));
        assert_eq!(msg.name.as_deref(), Some("analyze_resume_match"));
    }

    #[test]
    fn test_tool_definition_wire_format() {
        let def = ToolDefinition {
            name: "analyze_resume_match".to_string(),
            description: "Analyze the match".to_string(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        };
        let wire = def.to_wire_format();
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "analyze_resume_match");
    }

    #[test]
    fn test_reply_with_tool_calls_deserializes() {
        let raw = r#"{
            "role": "assistant",
            "content": null,
            "tool_calls": [
                {
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "identify_key_selling_points", "arguments": "{}"}
                }
            ]
        }"#;
        let message: ChatMessage = serde_json::from_str(raw).unwrap();
        let outcome = ChatOutcome {
            message,
            usage: None,
        };
        assert!(outcome.text().is_none());
        assert_eq!(outcome.tool_calls().len(), 1);
        assert_eq!(outcome.tool_calls()[0].function.name, "identify_key_selling_points");
    }

    #[test]
    fn test_chat_request_defaults() {
        let request = ChatRequest::new(vec![ChatMessage::user("hello")]);
        assert!(request.temperature.is_none());
        assert!(request.tools.is_empty());
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }
}
