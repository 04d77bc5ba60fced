//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::format::Method;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ChatRequest, LlmClient, LlmFuture};

/// Serves recorded chat replies from a cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn chat(&self, _request: &ChatRequest) -> LlmFuture<'_> {
        let output = next_output(&self.replayer, Method::Chat);
        Box::pin(async move { replay_result(&output, "llm::chat") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, Port};
    use crate::ports::{ChatMessage, Role};
    use chrono::Utc;
    use serde_json::json;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "test-model".into(),
            messages: vec![ChatMessage::user("hi")],
            tools: Vec::new(),
            json_response: true,
        }
    }

    #[tokio::test]
    async fn replays_ok_and_err_in_order() {
        let cassette = Cassette {
            name: "llm".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: Port::Llm,
                    method: Method::Chat,
                    input: json!({}),
                    output: json!({"ok": {"message": {"role": "assistant", "content": "{}"}}}),
                },
                Interaction {
                    seq: 1,
                    port: Port::Llm,
                    method: Method::Chat,
                    input: json!({}),
                    output: json!({"err": "rate limited"}),
                },
            ],
        };
        let client = ReplayingLlmClient::new(CassetteReplayer::new(&cassette));

        let first = client.chat(&request()).await.unwrap();
        assert_eq!(first.message.role, Role::Assistant);
        assert_eq!(first.message.content, "{}");
        assert_eq!(first.prompt_tokens, 0);

        let second = client.chat(&request()).await.unwrap_err();
        assert!(second.to_string().contains("rate limited"));
    }
}
