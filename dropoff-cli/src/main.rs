//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use dropoff_cli::{CliError, LOG_ENV};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    match dropoff_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("dropoff: {err}");
            std::process::exit(1);
        }
    }
}

/// Route `log` records to stderr, filtered by `DROPOFF_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
