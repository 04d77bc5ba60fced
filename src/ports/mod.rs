//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the mapper core and an external
//! system (filesystem, language model). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod llm;

pub use filesystem::FileSystem;
pub use llm::{
    ChatMessage, ChatRequest, ChatResponse, LlmClient, LlmFuture, Role, ToolCall, ToolDefinition,
};
