//! # SnokNAS Node Daemon
//!
//! Serves the SnokNAS dashboard: disk health collected from `lsblk` and
//! `smartctl` (or a synthetic fleet when not running as root), plus basic
//! host status.
//!
//! ## Usage
//! ```bash
//! snoknas-node --config /etc/snoknas/node.yaml
//! SNOKNAS_DUMMY=true snoknas-node --listen 127.0.0.1:8000
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use snoknas_disks::DiskStatusCollector;

mod cli;
mod config;
mod host;
mod http_server;
mod mode;

use cli::Args;
use config::{Config, LogFormat, DEFAULT_CONFIG_PATH};
use http_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging, which it configures
    let (config, config_source) = match &args.config {
        Some(config_path) => {
            // Explicit config file must exist
            let cfg = Config::load(config_path)?;
            (cfg.with_cli_overrides(&args), Some(config_path.clone()))
        }
        None => match Config::load(DEFAULT_CONFIG_PATH) {
            Ok(cfg) => (cfg.with_cli_overrides(&args), Some(DEFAULT_CONFIG_PATH.to_string())),
            Err(_) => (Config::default().with_cli_overrides(&args), None),
        },
    };

    // Initialize logging
    match config.logging.format {
        LogFormat::Pretty => snoknas_common::init_logging(&config.logging.level)?,
        LogFormat::Json => snoknas_common::init_logging_json(&config.logging.level)?,
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SnokNAS Node Daemon"
    );

    match &config_source {
        Some(path) => info!(config_path = %path, "Configuration loaded"),
        None => info!("No config file found, using CLI arguments and defaults"),
    }

    let collector_mode = mode::resolve_mode(
        config.collector.mode,
        mode::dummy_forced_by_env(),
        mode::is_privileged(),
    );

    let collector = Arc::new(DiskStatusCollector::new(collector_mode).with_tools(config.tool_paths()));
    let tools = collector.tools();
    info!(
        mode = %collector.mode(),
        lsblk = %tools.lsblk,
        smartctl = %tools.smartctl,
        "Disk collector configured"
    );

    let listen: SocketAddr = config
        .server
        .listen_address
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.server.listen_address))?;

    let state = Arc::new(AppState::new(collector, &config.server.webui_path));
    http_server::run_http_server(listen, state).await
}
