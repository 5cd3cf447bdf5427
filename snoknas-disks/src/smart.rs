//! SMART diagnostics via `smartctl --json`.

use serde::Deserialize;
use tracing::debug;

use crate::command::CommandRunner;
use crate::error::{DiskError, Result};

/// The subset of the smartctl JSON report the dashboard uses.
#[derive(Debug, Default, Deserialize)]
struct SmartctlReport {
    #[serde(default)]
    temperature: Option<TemperatureSection>,
    #[serde(default)]
    smart_status: Option<SmartStatusSection>,
    #[serde(default)]
    power_on_time: Option<PowerOnTimeSection>,
}

#[derive(Debug, Default, Deserialize)]
struct TemperatureSection {
    #[serde(default)]
    current: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartStatusSection {
    #[serde(default)]
    passed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct PowerOnTimeSection {
    #[serde(default)]
    hours: Option<f64>,
}

/// Fields extracted from one SMART report. `None` means the drive did not
/// report it, and the record keeps its default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmartSummary {
    pub temperature: Option<i64>,
    pub passed: Option<bool>,
    pub power_on_hours: Option<u64>,
}

/// Arguments for the diagnostic query.
///
/// `-n standby` makes smartctl bail out instead of spinning up a sleeping
/// disk.
pub fn smartctl_args(device_path: &str) -> [&str; 5] {
    ["-a", "-j", "-n", "standby", device_path]
}

/// Parse a smartctl JSON report.
pub fn parse_smart_report(json: &str) -> Result<SmartSummary> {
    let report: SmartctlReport =
        serde_json::from_str(json).map_err(|e| DiskError::malformed("smartctl", e))?;

    Ok(SmartSummary {
        temperature: report
            .temperature
            .and_then(|t| t.current)
            .map(|c| c.round() as i64),
        passed: report.smart_status.and_then(|s| s.passed),
        power_on_hours: report
            .power_on_time
            .and_then(|p| p.hours)
            .filter(|h| *h >= 0.0)
            .map(|h| h as u64),
    })
}

/// smartctl exit status bits that mean no report was produced: bit 0 is a
/// command-line error, bit 1 a device that could not be opened (including a
/// disk left asleep by `-n standby`). Bits 2-7 describe the disk and still
/// come with a full report; bit 3 is set whenever the health check fails.
pub const SMARTCTL_FATAL_EXIT_BITS: i32 = 0b11;

/// Whether a smartctl exit code still carries a usable JSON report.
pub fn exit_code_has_report(code: Option<i32>) -> bool {
    matches!(code, Some(code) if code & SMARTCTL_FATAL_EXIT_BITS == 0)
}

/// Run smartctl against `device_path` and summarize the report.
pub fn query_smart(
    runner: &dyn CommandRunner,
    smartctl: &str,
    device_path: &str,
) -> Result<SmartSummary> {
    let output = runner.output(smartctl, &smartctl_args(device_path))?;
    if !exit_code_has_report(output.code) {
        return Err(output.into_failure(smartctl));
    }
    if !output.success() {
        debug!(device = %device_path, code = ?output.code, "smartctl reported disk problems");
    }
    parse_smart_report(&output.stdout)
}
