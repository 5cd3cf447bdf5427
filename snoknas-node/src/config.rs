//! Configuration management for the Node Daemon.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use snoknas_disks::ToolPaths;

use crate::cli::Args;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/snoknas/node.yaml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Disk collector configuration
    pub collector: CollectorConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply CLI argument overrides to the configuration.
    pub fn with_cli_overrides(mut self, args: &Args) -> Self {
        if let Some(ref listen) = args.listen {
            self.server.listen_address = listen.clone();
        }

        if let Some(ref webui_path) = args.webui_path {
            self.server.webui_path = webui_path.clone();
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }

        if let Some(format) = args.log_format {
            self.logging.format = format;
        }

        if args.dummy {
            self.collector.mode = ModeSetting::Dummy;
        }

        self
    }

    /// Tool locations for the disk collector.
    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths {
            lsblk: self.collector.lsblk_path.clone(),
            smartctl: self.collector.smartctl_path.clone(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_address: String,
    /// Directory holding the dashboard's index.html and static assets
    pub webui_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8000".to_string(),
            webui_path: "/usr/share/snoknas/webui".to_string(),
        }
    }
}

/// Disk collector configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Requested collection mode
    pub mode: ModeSetting,
    /// lsblk executable
    pub lsblk_path: String,
    /// smartctl executable
    pub smartctl_path: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        let tools = ToolPaths::default();
        Self {
            mode: ModeSetting::default(),
            lsblk_path: tools.lsblk,
            smartctl_path: tools.smartctl,
        }
    }
}

/// Requested collector mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Live when running as root, synthetic otherwise
    #[default]
    Auto,
    /// Query the hardware (still requires root)
    Live,
    /// Always serve synthetic disks
    Dummy,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen_address, "0.0.0.0:8000");
        assert_eq!(config.collector.mode, ModeSetting::Auto);
        assert_eq!(config.collector.lsblk_path, "lsblk");
        assert_eq!(config.collector.smartctl_path, "smartctl");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
server:
  listen_address: "127.0.0.1:9000"
collector:
  mode: dummy
  smartctl_path: /usr/sbin/smartctl
logging:
  format: json
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("Failed to parse YAML");

        assert_eq!(config.server.listen_address, "127.0.0.1:9000");
        assert_eq!(config.server.webui_path, "/usr/share/snoknas/webui");
        assert_eq!(config.collector.mode, ModeSetting::Dummy);
        assert_eq!(config.collector.lsblk_path, "lsblk");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);

        let tools = config.tool_paths();
        assert_eq!(tools.smartctl, "/usr/sbin/smartctl");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "collector:\n  mode: live").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.collector.mode, ModeSetting::Live);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/snoknas/node.yaml").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "collector:\n  mode: sometimes").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args {
            listen: Some("0.0.0.0:8080".to_string()),
            log_level: Some("debug".to_string()),
            log_format: Some(LogFormat::Json),
            dummy: true,
            ..Default::default()
        };
        let config = Config::default().with_cli_overrides(&args);

        assert_eq!(config.server.listen_address, "0.0.0.0:8080");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.collector.mode, ModeSetting::Dummy);
    }

    #[test]
    fn test_cli_without_overrides_keeps_file_values() {
        let config = Config {
            collector: CollectorConfig {
                mode: ModeSetting::Live,
                ..Default::default()
            },
            ..Default::default()
        }
        .with_cli_overrides(&Args::default());

        assert_eq!(config.collector.mode, ModeSetting::Live);
        assert_eq!(config.server.listen_address, "0.0.0.0:8000");
    }
}
