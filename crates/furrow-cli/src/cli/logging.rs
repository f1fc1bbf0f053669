//! Log setup for the binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Default filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber: `RUST_LOG` if set, otherwise the level
/// picked by `-v`. Everything goes to stderr so stdout stays clean for
/// plan output.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 0)
        .without_time();

    // A second call (tests) leaves the first subscriber in place
    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
}
