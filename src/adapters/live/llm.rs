//! Live adapter for the `LlmClient` port using an OpenAI-compatible
//! chat completions API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{
    ChatMessage, ChatRequest, ChatResponse, LlmClient, LlmFuture, Role, ToolCall,
};

/// Live LLM client that calls a `/chat/completions` endpoint.
pub struct LiveLlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LiveLlmClient {
    /// Creates a client for the API rooted at `api_base`
    /// (e.g. `https://api.openai.com/v1`) authenticating with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
        }
    }
}

/// Request body sent to the chat completions API.
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// A single message in the request.
#[derive(Serialize)]
struct ApiMessage<'a> {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ApiToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ApiTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ApiFunctionDef<'a>,
}

#[derive(Serialize)]
struct ApiFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: ApiFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Top-level response from the chat completions API.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: ApiReply,
}

/// The assistant message inside a choice.
#[derive(Deserialize)]
struct ApiReply {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ApiToolCall>,
}

/// Token usage reported by the API.
#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Error response from the API.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn to_api_message(message: &ChatMessage) -> ApiMessage<'_> {
    let content = if message.content.is_empty() && !message.tool_calls.is_empty() {
        None
    } else {
        Some(message.content.as_str())
    };
    ApiMessage {
        role: message.role,
        content,
        tool_calls: message
            .tool_calls
            .iter()
            .map(|call| ApiToolCall {
                id: call.id.clone(),
                kind: function_kind(),
                function: ApiFunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            })
            .collect(),
        tool_call_id: message.tool_call_id.as_deref(),
    }
}

impl LlmClient for LiveLlmClient {
    fn chat(&self, request: &ChatRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = ApiRequest {
                model: &request.model,
                messages: request.messages.iter().map(to_api_message).collect(),
                tools: request
                    .tools
                    .iter()
                    .map(|tool| ApiTool {
                        kind: "function",
                        function: ApiFunctionDef {
                            name: &tool.name,
                            description: &tool.description,
                            parameters: &tool.parameters,
                        },
                    })
                    .collect(),
                response_format: request
                    .json_response
                    .then_some(ResponseFormat { kind: "json_object" }),
            };

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("chat completion request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to read chat completion response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("chat completion API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: ApiResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to parse chat completion response: {e}").into()
                },
            )?;

            let choice = api_response
                .choices
                .into_iter()
                .next()
                .ok_or("chat completion response contained no choices")?;

            let message = ChatMessage {
                role: Role::Assistant,
                content: choice.message.content.unwrap_or_default(),
                tool_calls: choice
                    .message
                    .tool_calls
                    .into_iter()
                    .map(|call| ToolCall {
                        id: call.id,
                        name: call.function.name,
                        arguments: call.function.arguments,
                    })
                    .collect(),
                tool_call_id: None,
            };

            Ok(ChatResponse {
                message,
                prompt_tokens: api_response.usage.prompt_tokens,
                completion_tokens: api_response.usage.completion_tokens,
            })
        })
    }
}
