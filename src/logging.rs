//! Shared logging setup for the CLI binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Determines the log level from CLI arguments.
#[must_use]
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Log output goes to stderr so that stdout stays free for the shell.
pub fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(log_level(3, true), Level::ERROR);
    }

    #[test]
    fn verbosity_ladder() {
        assert_eq!(log_level(0, false), Level::WARN);
        assert_eq!(log_level(1, false), Level::INFO);
        assert_eq!(log_level(2, false), Level::DEBUG);
        assert_eq!(log_level(5, false), Level::TRACE);
    }
}
