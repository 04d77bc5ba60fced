//! Per-file analysis: asks the oracle what a file does and which project
//! files it references.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::MapperConfig;
use crate::context::ServiceContext;
use crate::error::MapError;
use crate::map::resolve::{is_relative, match_project_path, resolve_import};
use crate::map::{tools, FileAnalysis};
use crate::ports::llm::{ChatMessage, ChatRequest};

const SYSTEM_PROMPT: &str = "\
You are a code analysis assistant. For the file you are given, describe its \
purpose in one or two sentences and list every project file it imports.

Respond with a single JSON object (no markdown fences):
{\"description\": \"<purpose of the file>\", \
\"modules\": {\"<project-relative path>\": \"<why it is imported>\"}}

Rules:
- Only use paths from the list of valid project files. Never invent paths.
- Leave out third-party packages and runtime built-ins.
- Use an empty object for \"modules\" when the file imports no project files.
- If you need to re-check a file's imports, call the get_file_imports tool.";

/// Analyses the file at project-relative `path` with the given `content`.
///
/// `files` is the full enumerated file set, shown to the oracle as the only
/// valid targets and used to normalize the paths it reports.
///
/// # Errors
///
/// Returns [`MapError::Oracle`] when the oracle call fails,
/// [`MapError::OracleResponse`] when the reply is not a usable analysis and
/// [`MapError::ToolLoopExhausted`] when the oracle keeps requesting tools.
/// A `max_tool_rounds` of zero is a [`MapError::Config`] error, which is not
/// tied to the file.
pub async fn analyze_file(
    ctx: &ServiceContext,
    config: &MapperConfig,
    files: &BTreeSet<String>,
    path: &str,
    content: &str,
) -> Result<FileAnalysis, MapError> {
    if config.max_tool_rounds == 0 {
        return Err(MapError::Config("max_tool_rounds must be at least 1".to_string()));
    }
    info!(file = path, "analysing");

    let mut request = ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(path, content, files)),
        ],
        tools: tools::definitions(),
        json_response: true,
    };

    for round in 1..=config.max_tool_rounds {
        let response = ctx
            .llm
            .chat(&request)
            .await
            .map_err(|e| MapError::Oracle { path: path.to_string(), message: e.to_string() })?;
        debug!(
            file = path,
            round,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            tool_calls = response.message.tool_calls.len(),
            "oracle replied"
        );

        let message = response.message;
        if message.tool_calls.is_empty() {
            let reply = parse_reply(path, &message.content)?;
            return Ok(into_analysis(path, reply, files, config));
        }

        let outputs: Vec<ChatMessage> = message
            .tool_calls
            .iter()
            .map(|call| ChatMessage::tool(&call.id, tools::execute(ctx, &config.root, files, call)))
            .collect();
        request.messages.push(message);
        request.messages.extend(outputs);
    }

    Err(MapError::ToolLoopExhausted { path: path.to_string(), rounds: config.max_tool_rounds })
}

/// Builds the user message for one file.
fn build_prompt(path: &str, content: &str, files: &BTreeSet<String>) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "## File\n\n{path}\n");
    prompt.push_str("## Valid project files\n\n");
    for file in files {
        let _ = writeln!(prompt, "- {file}");
    }
    let _ = write!(prompt, "\n## Content\n\n```\n{content}\n```\n");
    prompt
}

/// The JSON object the oracle is asked to produce.
#[derive(Debug, Deserialize)]
struct OracleReply {
    description: String,
    #[serde(default)]
    modules: Option<BTreeMap<String, String>>,
}

/// Parses the oracle's final answer, tolerating a surrounding code fence.
fn parse_reply(path: &str, text: &str) -> Result<OracleReply, MapError> {
    let body = strip_code_fence(text);
    let reply: OracleReply = serde_json::from_str(body).map_err(|e| MapError::OracleResponse {
        path: path.to_string(),
        message: format!("invalid JSON: {e}"),
    })?;
    if reply.description.trim().is_empty() {
        return Err(MapError::OracleResponse {
            path: path.to_string(),
            message: "empty description".to_string(),
        });
    }
    Ok(reply)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Normalizes the reported targets against `path` and the file set.
fn into_analysis(
    path: &str,
    reply: OracleReply,
    files: &BTreeSet<String>,
    config: &MapperConfig,
) -> FileAnalysis {
    let mut calls = Vec::new();
    for (reported, reason) in reply.modules.unwrap_or_default() {
        let reported = reported.trim();
        match normalize_target(reported, path, files, config) {
            Some(target) => calls.push((target, reason)),
            None if is_relative(reported) => {
                debug!(file = path, reported, "dropping reference outside the project root");
            }
            None => debug!(file = path, reported, "dropping reference: bare, not enumerated"),
        }
    }
    FileAnalysis { path: path.to_string(), description: reply.description.trim().to_string(), calls }
}

/// Maps a path reported by the oracle to a project-relative target.
///
/// Paths that already name an enumerated file are taken as-is. Relative
/// keys are resolved as import specifiers written in `importer`. Other
/// keys with a `/` are matched as project paths missing an extension or
/// an index file; single names such as `lodash` are packages.
fn normalize_target(
    reported: &str,
    importer: &str,
    files: &BTreeSet<String>,
    config: &MapperConfig,
) -> Option<String> {
    if files.contains(reported) {
        return Some(reported.to_string());
    }
    if is_relative(reported) {
        return resolve_import(reported, importer, files, &config.profile)
            .path()
            .map(String::from);
    }
    if reported.contains('/') {
        return match_project_path(reported, files, &config.profile);
    }
    None
}
