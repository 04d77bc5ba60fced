//! Cassette data structures for recording and replaying port interactions.
//!
//! Interactions are tagged with a typed [`Method`]; the port name written
//! next to it is derived from the method, so a cassette line such as
//! `port: fs` / `method: list_files` can only be produced by the crate's
//! own ports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External boundary an interaction crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    /// The [`FileSystem`](crate::ports::FileSystem) port.
    Fs,
    /// The [`LlmClient`](crate::ports::LlmClient) port.
    Llm,
}

/// Port operation an interaction recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// `FileSystem::read_to_string`.
    ReadToString,
    /// `FileSystem::write`.
    Write,
    /// `FileSystem::list_files`.
    ListFiles,
    /// `LlmClient::chat`.
    Chat,
}

impl Port {
    /// Name used in cassette files and cassette file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Llm => "llm",
        }
    }
}

impl Method {
    /// The port this method belongs to.
    #[must_use]
    pub fn port(self) -> Port {
        match self {
            Self::ReadToString | Self::Write | Self::ListFiles => Port::Fs,
            Self::Chat => Port::Llm,
        }
    }

    /// Name used in cassette files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadToString => "read_to_string",
            Self::Write => "write",
            Self::ListFiles => "list_files",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.port().as_str(), self.as_str())
    }
}

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number across the whole cassette.
    pub seq: u64,
    /// Port the method belongs to; always `method.port()`.
    pub port: Port,
    /// Method invoked on the port.
    pub method: Method,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// `{"ok": value}` or `{"err": message}`.
    pub output: serde_json::Value,
}

impl Interaction {
    /// Creates an interaction, deriving the port from `method`.
    #[must_use]
    pub fn new(
        seq: u64,
        method: Method,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Self {
        Self { seq, port: method.port(), method, input, output }
    }
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash at recording time.
    pub commit: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}
