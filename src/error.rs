//! Error type for map generation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while building a module map.
///
/// Per-file variants ([`MapError::is_per_file`]) are subject to the
/// configured failure policy; the rest always abort the run.
#[derive(Debug, Error)]
pub enum MapError {
    /// The project root could not be walked.
    #[error("failed to enumerate source files under {}: {message}", root.display())]
    Enumerate {
        /// Project root that was walked.
        root: PathBuf,
        /// Underlying cause.
        message: String,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {message}")]
    ReadFile {
        /// Project-relative path of the file.
        path: String,
        /// Underlying cause.
        message: String,
    },

    /// The oracle could not be reached or rejected the request.
    #[error("oracle request failed for {path}: {message}")]
    Oracle {
        /// File under analysis.
        path: String,
        /// Underlying cause.
        message: String,
    },

    /// The oracle replied with something that is not a usable analysis.
    #[error("unusable oracle reply for {path}: {message}")]
    OracleResponse {
        /// File under analysis.
        path: String,
        /// What was wrong with the reply.
        message: String,
    },

    /// The oracle kept asking for tools past the round limit.
    #[error("oracle for {path} still requested tools after {rounds} rounds")]
    ToolLoopExhausted {
        /// File under analysis.
        path: String,
        /// Number of round-trips made.
        rounds: usize,
    },

    /// The map could not be rendered as YAML.
    #[error("failed to serialize module map: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The rendered map could not be written.
    #[error("failed to write module map to {}: {message}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },

    /// The run is misconfigured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MapError {
    /// Returns the project-relative file a failure belongs to, if any.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::ReadFile { path, .. }
            | Self::Oracle { path, .. }
            | Self::OracleResponse { path, .. }
            | Self::ToolLoopExhausted { path, .. } => Some(path),
            Self::Enumerate { .. } | Self::Serialize(_) | Self::Write { .. } | Self::Config(_) => {
                None
            }
        }
    }

    /// Returns `true` when the failure is attributable to one file only.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        self.file().is_some()
    }
}
