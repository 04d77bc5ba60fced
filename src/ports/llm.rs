//! LLM client port for chat-style completions with tool calling.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ChatResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Author of a message in the conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the whole conversation.
    System,
    /// Input supplied by the mapper.
    User,
    /// Reply produced by the model.
    Assistant,
    /// Output of a tool the model asked for.
    Tool,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Identifier used to pair the tool output with this call.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Raw JSON-encoded arguments.
    pub arguments: String,
}

/// A single role-tagged message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Text content (may be empty for assistant messages that only call tools).
    #[serde(default)]
    pub content: String,
    /// Tool calls requested by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For tool messages, the id of the call this output answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    /// Creates an assistant message with plain text content.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// Creates a tool output message answering the call `tool_call_id`.
    #[must_use]
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), tool_calls: Vec::new(), tool_call_id: None }
    }
}

/// A function the model may call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Function name.
    pub name: String,
    /// What the function does, shown to the model.
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: serde_json::Value,
}

/// A request to continue a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model identifier (e.g. `"gpt-4o"`).
    pub model: String,
    /// The ordered conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Tools the model may call; empty when tool use is disabled.
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    /// Ask the provider to force a reply parseable as a JSON object.
    #[serde(default)]
    pub json_response: bool,
}

/// The reply to a [`ChatRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// The assistant message, possibly carrying tool calls.
    pub message: ChatMessage,
    /// Number of prompt tokens consumed.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of completion tokens generated.
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Sends chat requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates the next assistant message for the given conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn chat(&self, request: &ChatRequest) -> LlmFuture<'_>;
}
