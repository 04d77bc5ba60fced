//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::config::{
    FailurePolicy, MapperConfig, DEFAULT_API_BASE, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_MODEL,
    DEFAULT_OUTPUT,
};

/// Top-level CLI parser for `modmap`.
#[derive(Debug, Parser)]
#[command(
    name = "modmap",
    version,
    about = "Map which source files call which, with a description of each"
)]
pub struct Cli {
    /// Project root to map.
    #[arg(long, env = "MODMAP_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Where to write the YAML map; relative paths are taken from the root.
    #[arg(long, env = "MODMAP_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Model used for file analysis.
    #[arg(long, env = "MODMAP_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "MODMAP_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// API key for the model provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// What to do when a single file cannot be analysed.
    #[arg(long, value_enum, default_value = "abort")]
    pub on_error: FailurePolicy,

    /// Maximum oracle round-trips per file, tool calls included.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_TOOL_ROUNDS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_tool_rounds: usize,
}

impl Cli {
    /// Converts the parsed arguments into a run configuration.
    #[must_use]
    pub fn mapper_config(&self) -> MapperConfig {
        let mut config = MapperConfig::new(&self.root).with_output(&self.output);
        config.model.clone_from(&self.model);
        config.on_error = self.on_error;
        config.max_tool_rounds = self.max_tool_rounds;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use crate::config::FailurePolicy;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_explicit_flags() {
        let cli = Cli::parse_from([
            "modmap",
            "--root",
            "/work/app",
            "--output",
            "deps.yaml",
            "--model",
            "gpt-4o-mini",
            "--api-key",
            "sk-test",
            "--on-error",
            "skip",
            "--max-tool-rounds",
            "3",
        ]);
        assert_eq!(cli.root, PathBuf::from("/work/app"));
        assert_eq!(cli.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cli.on_error, FailurePolicy::Skip);

        let config = cli.mapper_config();
        assert_eq!(config.output, PathBuf::from("/work/app/deps.yaml"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tool_rounds, 3);
        assert_eq!(config.on_error, FailurePolicy::Skip);
    }

    #[test]
    fn rejects_zero_tool_rounds() {
        let result = Cli::try_parse_from(["modmap", "--max-tool-rounds", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_failure_policy() {
        let result = Cli::try_parse_from(["modmap", "--on-error", "retry"]);
        assert!(result.is_err());
    }
}
