//! Logging setup.
//!
//! Everything goes to stderr so stdout stays free for JSON output. `RUST_LOG`
//! overrides the default level.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Default level: `warn` when quiet, `info` otherwise.
pub fn default_level(quiet: bool) -> Level {
    if quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(quiet: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(quiet).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_lowers_level() {
        assert_eq!(default_level(true), Level::WARN);
        assert_eq!(default_level(false), Level::INFO);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(true);
        init(false);
    }
}
