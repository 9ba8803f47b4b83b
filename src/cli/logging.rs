//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag and `RUST_LOG`
///
/// Logs go to stderr, stdout carries the graph or snapshot. Without
/// `--debug` or `RUST_LOG` nothing is logged. Returns whether a subscriber
/// was installed.
pub fn init_logging(debug: bool) -> bool {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            // No logging by default (silent operation)
            Err(_) => return false,
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .try_init()
        .is_ok()
}
