//! Run configuration for the mapper.

use std::path::PathBuf;

use clap::ValueEnum;

/// Default destination of the map, relative to the project root.
pub const DEFAULT_OUTPUT: &str = ".modmap/module_map.yaml";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default base URL of the chat completions API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default bound on oracle round-trips per file.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 5;

/// What to do when a single file cannot be analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing file; nothing is written.
    #[default]
    Abort,
    /// Log the failure, leave the file out of the map and keep going.
    Skip,
}

/// Which files count as sources and how imports resolve to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Recognized source extensions without the dot; the first is primary.
    pub extensions: Vec<String>,
    /// File stem tried when a specifier names a directory.
    pub index_stem: String,
    /// Infixes that exclude a file as `name.<infix>.<ext>`.
    pub excluded_infixes: Vec<String>,
    /// Directory names never descended into (besides dot-directories).
    pub dependency_dirs: Vec<String>,
}

impl LanguageProfile {
    /// Profile for TypeScript/JavaScript projects.
    #[must_use]
    pub fn typescript() -> Self {
        Self {
            extensions: ["ts", "tsx", "js", "jsx"].map(String::from).to_vec(),
            index_stem: "index".to_string(),
            excluded_infixes: ["d", "test", "config"].map(String::from).to_vec(),
            dependency_dirs: vec!["node_modules".to_string()],
        }
    }

    /// The extension appended to unresolved import guesses.
    #[must_use]
    pub fn primary_extension(&self) -> &str {
        self.extensions.first().map_or("ts", String::as_str)
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::typescript()
    }
}

/// Fully resolved settings for one mapping run.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// Project root that is walked and that all paths are relative to.
    pub root: PathBuf,
    /// Where the YAML map is written.
    pub output: PathBuf,
    /// Model identifier sent with every request.
    pub model: String,
    /// Failure handling for per-file errors.
    pub on_error: FailurePolicy,
    /// Maximum oracle round-trips per file, tool calls included.
    pub max_tool_rounds: usize,
    /// Source file conventions.
    pub profile: LanguageProfile,
}

impl MapperConfig {
    /// Creates a configuration with defaults for everything but the root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output: root.join(DEFAULT_OUTPUT),
            root,
            model: DEFAULT_MODEL.to_string(),
            on_error: FailurePolicy::default(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            profile: LanguageProfile::default(),
        }
    }

    /// Sets the output path; relative paths are taken from the root.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        self.output = if output.is_absolute() { output } else { self.root.join(output) };
        self
    }
}
