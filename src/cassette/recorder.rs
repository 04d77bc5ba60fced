//! Records port interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use super::format::{Cassette, Interaction, Method};

/// Collects interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path` on [`finish`](Self::finish).
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Record a raw interaction; `seq` is the number of interactions so far.
    pub fn record(&mut self, method: Method, input: Value, output: Value) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction::new(seq, method, input, output));
    }

    /// Record the outcome of a port call as `{"ok": value}` or
    /// `{"err": message}`, the shape the replaying adapters read back.
    ///
    /// Inputs or values that cannot be serialized are recorded as `null`,
    /// so recording never changes the outcome of the call.
    pub fn record_result<I, T, E>(&mut self, method: Method, input: &I, result: &Result<T, E>)
    where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let input = serde_json::to_value(input).unwrap_or_default();
        let output = match result {
            Ok(value) => json!({ "ok": serde_json::to_value(value).unwrap_or_default() }),
            Err(e) => json!({ "err": e.to_string() }),
        };
        self.record(method, input, output);
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Write the cassette, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
