//! Tracing subscriber setup for the SnokNAS daemons.
//!
//! Both entry points install a global subscriber once per process; a second
//! call returns an error instead of panicking.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the configured level.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Human-readable logs with source locations, for a terminal or journald.
///
/// ```
/// snoknas_common::init_logging("info").unwrap();
/// tracing::info!(disks = 8, "collector ready");
/// ```
pub fn init_logging(level: &str) -> Result<()> {
    let console = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(level_filter(level))
        .with(console)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))
}

/// One JSON object per line, for log shippers.
pub fn init_logging_json(level: &str) -> Result<()> {
    let json = fmt::layer().json().with_target(true).with_thread_ids(true);

    tracing_subscriber::registry()
        .with(level_filter(level))
        .with(json)
        .try_init()
        .map_err(|e| anyhow!("JSON logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        assert!(init_logging("debug").is_ok());
        assert!(init_logging_json("debug").is_err());
        assert!(init_logging("warn").is_err());
    }
}
