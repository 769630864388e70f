//! Diagnostic logging
//!
//! Per-file console lines are the run's output and go through
//! [`crate::ui::RunReporter`]. Everything else is `tracing` events written to
//! stderr, filtered by `-v` count or `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "webfs=debug",
        _ => "webfs=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
