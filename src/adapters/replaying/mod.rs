//! Replaying adapters that replay recorded interactions.

pub mod filesystem;
pub mod llm;

use std::sync::Mutex;

use crate::cassette::format::Method;
use crate::cassette::replayer::CassetteReplayer;

pub use filesystem::ReplayingFileSystem;
pub use llm::ReplayingLlmClient;

/// Takes the output of the next interaction recorded for `method`.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette is exhausted.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, method: Method) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(method).output
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`; a bare value is
/// treated as `ok`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
