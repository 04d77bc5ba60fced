//! Command dispatch and handlers.

pub mod map;

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::error::MapError;

/// Dispatch a parsed command line to the map handler.
///
/// When `MODMAP_REPLAY` names a cassette file, or a session directory
/// written by an earlier `MODMAP_RECORD` run, every port is served from it
/// and no API key is needed. When `MODMAP_RECORD` is set to a directory
/// path, all port interactions are recorded to per-port cassette files in
/// a timestamped directory below it.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the run fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    if let Ok(path) = env::var("MODMAP_REPLAY") {
        let ctx = ServiceContext::replaying_path(Path::new(&path))?;
        return map::run(&ctx, cli);
    }

    let api_key = require_api_key(cli).map_err(|e| e.to_string())?;

    let (ctx, session) = if let Ok(path) = env::var("MODMAP_RECORD") {
        let session = RecordingSession::new(&PathBuf::from(path))?;
        info!(dir = %session.output_dir().display(), "recording port interactions");
        let ctx = ServiceContext::recording(&session, api_key, &cli.api_base);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(api_key, &cli.api_base), None)
    };

    let result = map::run(&ctx, cli);

    // Finish recording after the run completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

fn require_api_key(cli: &Cli) -> Result<&str, MapError> {
    cli.api_key.as_deref().filter(|key| !key.trim().is_empty()).ok_or_else(|| {
        MapError::Config("no API key given; set OPENAI_API_KEY or pass --api-key".to_string())
    })
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let mut cli = Cli::parse_from(["modmap"]);
        cli.api_key = None;
        let err = require_api_key(&cli).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let mut cli = Cli::parse_from(["modmap"]);
        cli.api_key = Some("  ".into());
        assert!(require_api_key(&cli).is_err());
    }

    #[test]
    fn api_key_is_passed_through() {
        let mut cli = Cli::parse_from(["modmap"]);
        cli.api_key = Some("sk-test".into());
        assert_eq!(require_api_key(&cli).unwrap(), "sk-test");
    }
}
