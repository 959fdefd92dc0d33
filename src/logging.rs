//! Tracing subscriber setup for the demonstration binary.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so that the
/// binary's stdout carries only the final state. Calling this twice is a
/// no-op apart from a note on stderr.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = result {
        eprintln!("Warning: tracing already initialized: {}", err);
    }
}
