//! Binary entrypoint for the `modmap` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modmap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Recording and replay are handled in commands::dispatch via
    // MODMAP_RECORD=<dir> and MODMAP_REPLAY=<cassette>.
    match modmap::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
