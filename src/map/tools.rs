//! Tools the oracle may call while analysing a file.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::context::ServiceContext;
use crate::ports::{ToolCall, ToolDefinition};

/// Name of the tool returning a file's raw import lines.
pub const GET_FILE_IMPORTS: &str = "get_file_imports";

/// Definitions of every tool offered to the oracle.
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: GET_FILE_IMPORTS.to_string(),
        description: "Return the raw import statements of a project file. Use it when you \
                      need to re-check which files a given file imports."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Project-relative path, exactly as listed among the valid files"
                }
            },
            "required": ["path"]
        }),
    }]
}

#[derive(Deserialize)]
struct PathArgs {
    path: String,
}

/// Runs `call` and returns the JSON payload handed back to the oracle.
///
/// Failures (unknown tool, bad arguments, a path outside `files`, an
/// unreadable file) are reported to the oracle in an `error` field rather
/// than aborting the analysis.
#[must_use]
pub fn execute(
    ctx: &ServiceContext,
    root: &Path,
    files: &BTreeSet<String>,
    call: &ToolCall,
) -> String {
    debug!(tool = %call.name, arguments = %call.arguments, "executing tool call");
    if call.name != GET_FILE_IMPORTS {
        return json!({ "error": format!("unknown tool: {}", call.name) }).to_string();
    }

    let args: PathArgs = match serde_json::from_str(&call.arguments) {
        Ok(args) => args,
        Err(e) => return json!({ "error": format!("invalid arguments: {e}") }).to_string(),
    };
    let path = args.path.trim().trim_start_matches("./");

    if !files.contains(path) {
        return json!({ "path": path, "error": "not a project source file" }).to_string();
    }

    match ctx.fs.read_to_string(&root.join(path)) {
        Ok(content) => json!({ "path": path, "imports": import_lines(&content) }).to_string(),
        Err(e) => json!({ "path": path, "error": e.to_string() }).to_string(),
    }
}

/// Returns the lines of `content` that start with an `import` keyword.
#[must_use]
pub fn import_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.strip_prefix("import").is_some_and(|rest| {
                !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
            })
        })
        .map(String::from)
        .collect()
}
