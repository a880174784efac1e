//! Scripted chat backends for tests — no network calls, no env mutation.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ChatBackend, ChatMessage, ChatOutcome, ChatRequest, FunctionCall, LlmError, ToolCallPayload,
};

/// Replies with a fixed sequence of outcomes, one per call, and records
/// every request it saw so tests can assert on call counts and payloads.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<ChatOutcome>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<ChatOutcome>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Convenience constructor: one plain-text reply per entry.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| text_reply(t)).collect())
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Fails every call at the transport layer with the given status.
pub struct FailingBackend {
    pub status: u16,
    pub message: String,
}

#[async_trait]
impl ChatBackend for FailingBackend {
    async fn complete(&self, _request: &ChatRequest) -> Result<ChatOutcome, LlmError> {
        Err(LlmError::Api {
            status: self.status,
            message: self.message.clone(),
        })
    }
}

/// A plain-text assistant reply.
pub fn text_reply(text: &str) -> ChatOutcome {
    ChatOutcome {
        message: ChatMessage {
            role: "assistant".to_string(),
            content: Some(text.to_string()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        },
        usage: None,
    }
}

/// An assistant reply requesting a single tool call.
pub fn tool_call_reply(call_id: &str, name: &str, arguments: &str) -> ChatOutcome {
    ChatOutcome {
        message: ChatMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![ToolCallPayload {
                id: call_id.to_string(),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            }]),
            tool_call_id: None,
            name: None,
        },
        usage: None,
    }
}
