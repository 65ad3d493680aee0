use std::io;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Builds the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `level` is used, and an unparseable
/// `level` falls back to `info`.
fn make_filter(level: &str) -> (EnvFilter, Option<String>) {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return (filter, None);
    }
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new("info"),
            Some(format!("invalid log level '{level}': {e}")),
        ),
    }
}

/// Initialise the tracing subscriber. Call once at startup.
///
/// * Writes to stderr so stdout carries only the tool response.
/// * Strips timestamps and target names to keep CLI output clean.
/// * Repeated calls are ignored.
pub fn init_logging(level: &str) {
    let (filter, problem) = make_filter(level);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .is_ok();

    if let (true, Some(problem)) = (installed, problem) {
        warn!("{problem}, using 'info'");
    }
}
