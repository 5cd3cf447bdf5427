//! Host status for the dashboard header.

use serde::Serialize;
use std::sync::Mutex;
use sysinfo::System;

/// Distribution label shown by the dashboard.
pub const OS_LABEL: &str = "SnokOS/Linux";

/// Host status as returned by `GET /api/system`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub cpu_percent: f32,
    pub memory_percent: f64,
    /// Collector mode, "Live" or "Dummy"
    pub mode: String,
    pub hostname: String,
    /// OS family ("Linux")
    pub platform: String,
    /// Kernel release
    pub version: String,
    /// Uptime as HH:MM:SS
    pub uptime: String,
    pub uptime_seconds: u64,
    pub os: String,
}

/// Samples CPU and memory usage.
///
/// CPU usage is a delta, so the sampler keeps one `System` and reports the
/// usage since the previous call.
pub struct HostSampler {
    system: Mutex<System>,
}

impl HostSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self {
            system: Mutex::new(system),
        }
    }

    /// Take a sample. `mode` is passed through for display.
    pub fn sample(&self, mode: &str) -> SystemStatus {
        let (cpu_percent, memory_percent) = match self.system.lock() {
            Ok(mut system) => {
                system.refresh_cpu_usage();
                system.refresh_memory();
                (
                    system.global_cpu_usage(),
                    percent(system.used_memory(), system.total_memory()),
                )
            }
            Err(_) => (0.0, 0.0),
        };

        let uptime_seconds = System::uptime();

        SystemStatus {
            cpu_percent,
            memory_percent,
            mode: mode.to_string(),
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: platform_name().to_string(),
            version: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            uptime: format_uptime(uptime_seconds),
            uptime_seconds,
            os: OS_LABEL.to_string(),
        }
    }
}

impl Default for HostSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64) * 100.0
    }
}

/// OS family in the spelling the dashboard expects.
fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

/// Time-of-day style uptime; the hour wraps every 24 hours.
pub fn format_uptime(seconds: u64) -> String {
    let hours = (seconds / 3600) % 24;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(59), "00:00:59");
        assert_eq!(format_uptime(3_725), "01:02:05");
        assert_eq!(format_uptime(86_399), "23:59:59");
        assert_eq!(format_uptime(86_400 + 61), "00:01:01");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(512, 1024), 50.0);
    }

    #[test]
    fn test_sample() {
        let sampler = HostSampler::new();
        let status = sampler.sample("Dummy");
        assert_eq!(status.mode, "Dummy");
        assert_eq!(status.os, OS_LABEL);
        assert!(!status.platform.is_empty());
        assert!((0.0..=100.0).contains(&status.memory_percent));
        assert_eq!(status.uptime, format_uptime(status.uptime_seconds));
    }
}
