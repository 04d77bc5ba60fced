//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, LiveLlmClient};
use crate::adapters::recording::{RecordingFileSystem, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingLlmClient};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::format::Port;
use crate::cassette::session::{cassette_file_name, RecordingSession};
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording),
/// and [`ServiceContext::new`] accepts any pair, which is how tests inject
/// stub oracles.
pub struct ServiceContext {
    /// Filesystem for enumeration and file I/O.
    pub fs: Box<dyn FileSystem>,
    /// LLM client acting as the oracle.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, llm: Box<dyn LlmClient>) -> Self {
        Self { fs, llm }
    }

    /// Creates a live context talking to the API at `api_base`.
    #[must_use]
    pub fn live(api_key: &str, api_base: &str) -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveLlmClient::new(api_key, api_base)))
    }

    /// Creates a live context whose interactions are captured by `session`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`].
    #[must_use]
    pub fn recording(session: &RecordingSession, api_key: &str, api_base: &str) -> Self {
        Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            Box::new(RecordingLlmClient::new(
                Box::new(LiveLlmClient::new(api_key, api_base)),
                Arc::clone(&session.llm),
            )),
        )
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Both ports are served by the same cassette; each gets its own
    /// replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::load(path)?)),
            Box::new(ReplayingLlmClient::new(CassetteReplayer::load(path)?)),
        ))
    }

    /// Creates a replaying context from the per-port cassettes written by a
    /// recording session (`fs.cassette.yaml` and `llm.cassette.yaml`).
    ///
    /// # Errors
    ///
    /// Returns an error if either cassette file cannot be read or parsed.
    pub fn replaying_session(dir: &Path) -> Result<Self, String> {
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::load(
                &dir.join(cassette_file_name(Port::Fs)),
            )?)),
            Box::new(ReplayingLlmClient::new(CassetteReplayer::load(
                &dir.join(cassette_file_name(Port::Llm)),
            )?)),
        ))
    }

    /// Creates a replaying context from whatever `MODMAP_REPLAY` names: a
    /// session directory goes to [`replaying_session`](Self::replaying_session),
    /// anything else is read as a single cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be read or parsed.
    pub fn replaying_path(path: &Path) -> Result<Self, String> {
        if path.is_dir() {
            Self::replaying_session(path)
        } else {
            Self::replaying(path)
        }
    }
}
