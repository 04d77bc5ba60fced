//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::format::Method;
use crate::cassette::recorder::CassetteRecorder;

pub use filesystem::RecordingFileSystem;
pub use llm::RecordingLlmClient;

/// Record a port call on a shared recorder.
///
/// The ok/err encoding lives in [`CassetteRecorder::record_result`]; this
/// only takes the lock.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    method: Method,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    match recorder.lock() {
        Ok(mut guard) => guard.record_result(method, input, result),
        Err(_) => tracing::warn!(%method, "cassette recorder lock poisoned; dropping interaction"),
    }
}
