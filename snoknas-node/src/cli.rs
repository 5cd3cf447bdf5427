//! Command-line argument parsing.

use clap::Parser;

use crate::config::LogFormat;

/// SnokNAS Node Daemon - disk health dashboard backend
#[derive(Parser, Debug, Default)]
#[command(name = "snoknas-node")]
#[command(about = "SnokNAS Node Daemon - disk health dashboard backend")]
#[command(version)]
pub struct Args {
    /// Path to configuration file (optional, defaults used if not found)
    #[arg(short, long, env = "SNOKNAS_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Listen address for the HTTP server
    #[arg(long)]
    pub listen: Option<String>,

    /// Path to the dashboard's static files
    #[arg(long)]
    pub webui_path: Option<String>,

    /// Serve synthetic disks instead of querying the hardware
    #[arg(long)]
    pub dummy: bool,
}
