//! Structured logging with environment variable configuration.
//!
//! Logs go to stderr so generated documents printed on stdout stay clean.
//! Records emitted through the `log` facade by the library crates are
//! forwarded into the same subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `STORY_BDD_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber or `log` bridge is already installed, this
/// function leaves it in place.
pub fn init_logging(config: &CliConfig) {
    let filter = filter_from_config(config);

    // The first subscriber wins; later calls are no-ops.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
