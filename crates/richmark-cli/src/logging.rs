//! Diagnostic logging for the richmark binary.
//!
//! Logs go to stderr so stdout carries only the exported document.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable that overrides every other level setting
pub const LOG_ENV: &str = "RICHMARK_LOG";

/// Pick the filter directive: `-v` raises to debug, `-vv` to trace.
fn level_for(config: &LoggingConfig, verbosity: u8) -> &str {
    match verbosity {
        0 => config.level.as_str(),
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber.
pub fn init(config: &LoggingConfig, verbosity: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(config, verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
