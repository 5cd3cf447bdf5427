//! Data types shared by the live and synthetic collection paths.

use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel rendered for readings a disk did not (or could not) report.
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Collector Mode
// =============================================================================

/// Where disk records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollectorMode {
    /// Query `lsblk` and `smartctl` on the host.
    Live,
    /// Fabricate a fixed fleet of plausible disks.
    Dummy,
}

impl fmt::Display for CollectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectorMode::Live => write!(f, "Live"),
            CollectorMode::Dummy => write!(f, "Dummy"),
        }
    }
}

// =============================================================================
// Disk Classification
// =============================================================================

/// Media type, derived from the rotational flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiskKind {
    Hdd,
    Ssd,
}

impl DiskKind {
    /// Spinning media is an HDD, everything else is flash.
    pub fn from_rotational(rotational: bool) -> Self {
        if rotational {
            DiskKind::Hdd
        } else {
            DiskKind::Ssd
        }
    }
}

/// Overall health verdict shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiskHealth {
    Good,
    Bad,
    Warning,
    #[default]
    Unknown,
}

/// SMART self-assessment as a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SmartStatus {
    Passed,
    Failed,
    Degraded,
    #[default]
    Unknown,
}

impl SmartStatus {
    /// Map the SMART overall-health boolean to health and status.
    pub fn from_verdict(passed: bool) -> (DiskHealth, SmartStatus) {
        if passed {
            (DiskHealth::Good, SmartStatus::Passed)
        } else {
            (DiskHealth::Bad, SmartStatus::Failed)
        }
    }
}

// =============================================================================
// Readings
// =============================================================================

/// A numeric reading that may be unavailable.
///
/// Serializes as the bare number, or as `"N/A"` when unavailable, so the
/// field is always present in the JSON record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading<T> {
    Value(T),
    NotAvailable,
}

impl<T> Reading<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::NotAvailable => None,
        }
    }
}

impl<T> Default for Reading<T> {
    fn default() -> Self {
        Reading::NotAvailable
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::NotAvailable, Reading::Value)
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => v.serialize(serializer),
            Reading::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

// =============================================================================
// Disk Record
// =============================================================================

/// One physical storage device as presented to the dashboard.
///
/// Build records with [`DiskRecordBuilder`](crate::DiskRecordBuilder) so that
/// `kind` always agrees with `rotational`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskRecord {
    /// Kernel device name (e.g. "sda", "nvme0n1")
    pub name: String,
    /// Human-readable capacity as reported by lsblk (e.g. "16T")
    pub size: String,
    pub model: String,
    pub serial: String,
    /// True for spinning media
    pub rotational: bool,
    pub kind: DiskKind,
    /// Uppercased transport ("SATA", "NVME", "USB") or "UNKNOWN"
    pub interface: String,
    /// Current temperature in degrees Celsius
    pub temperature: Reading<i64>,
    pub health: DiskHealth,
    pub smart_status: SmartStatus,
    pub power_on_hours: Reading<u64>,
    /// Child block devices, passed through from lsblk untouched
    pub partitions: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reading_serialization() {
        assert_eq!(serde_json::to_value(Reading::Value(39i64)).unwrap(), json!(39));
        assert_eq!(serde_json::to_value(Reading::<i64>::NotAvailable).unwrap(), json!("N/A"));
    }

    #[test]
    fn test_reading_from_option() {
        assert_eq!(Reading::from(Some(7u64)), Reading::Value(7));
        assert_eq!(Reading::<u64>::from(None), Reading::NotAvailable);
        assert_eq!(Reading::<u64>::default(), Reading::NotAvailable);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(DiskKind::Hdd).unwrap(), json!("HDD"));
        assert_eq!(serde_json::to_value(DiskKind::Ssd).unwrap(), json!("SSD"));
        assert_eq!(serde_json::to_value(DiskHealth::Warning).unwrap(), json!("WARNING"));
        assert_eq!(serde_json::to_value(SmartStatus::Degraded).unwrap(), json!("Degraded"));
        assert_eq!(CollectorMode::Dummy.to_string(), "Dummy");
        assert_eq!(serde_json::to_value(CollectorMode::Live).unwrap(), json!("Live"));
    }

    #[test]
    fn test_verdict_mapping() {
        assert_eq!(SmartStatus::from_verdict(true), (DiskHealth::Good, SmartStatus::Passed));
        assert_eq!(SmartStatus::from_verdict(false), (DiskHealth::Bad, SmartStatus::Failed));
    }
}
