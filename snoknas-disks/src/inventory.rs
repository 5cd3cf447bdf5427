//! Block-device inventory via `lsblk`.
//!
//! `lsblk -J` output varies between util-linux releases: older versions emit
//! `"rota": "1"` and sizes as strings, newer ones emit JSON booleans and
//! (with `-b`) numbers. Both shapes are accepted here.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::command::CommandRunner;
use crate::error::{DiskError, Result};

/// Columns requested from lsblk.
pub const LSBLK_COLUMNS: &str = "NAME,SIZE,MODEL,SERIAL,TYPE,FSTYPE,MOUNTPOINT,ROTA,TRAN";

/// Name prefixes of kernel devices that are never physical disks.
const VIRTUAL_PREFIXES: [&str; 3] = ["loop", "ram", "zram"];

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    #[serde(default)]
    blockdevices: Vec<BlockDevice>,
}

/// One top-level entry of the lsblk device tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockDevice {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub serial: Option<String>,
    /// Device class: "disk", "part", "rom", "loop", "lvm", ...
    #[serde(rename = "type", default, deserialize_with = "deserialize_text")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub fstype: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mountpoint: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub rota: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub tran: Option<String>,
    #[serde(default)]
    pub children: Vec<Value>,
}

impl BlockDevice {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether this entry is a real disk worth probing.
    pub fn is_physical_disk(&self) -> bool {
        let name = self.name();
        self.device_type.as_deref() == Some("disk")
            && !name.is_empty()
            && !is_virtual_device_name(name)
    }
}

/// Loop, RAM and zram devices are reported by lsblk but are not hardware.
pub fn is_virtual_device_name(name: &str) -> bool {
    name.contains("loop") || VIRTUAL_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Arguments for the inventory query.
pub fn lsblk_args() -> [&'static str; 3] {
    ["-J", "-o", LSBLK_COLUMNS]
}

/// Parse an lsblk JSON document into its top-level devices.
pub fn parse_inventory(json: &str) -> Result<Vec<BlockDevice>> {
    let output: LsblkOutput =
        serde_json::from_str(json).map_err(|e| DiskError::malformed("lsblk", e))?;
    Ok(output.blockdevices)
}

/// Run lsblk and return the physical disks, in inventory order.
pub fn query_physical_disks(runner: &dyn CommandRunner, lsblk: &str) -> Result<Vec<BlockDevice>> {
    let stdout = runner.run(lsblk, &lsblk_args())?;
    let devices = parse_inventory(&stdout)?;
    let total = devices.len();

    let disks: Vec<BlockDevice> = devices
        .into_iter()
        .filter(|dev| {
            let keep = dev.is_physical_disk();
            if !keep {
                debug!(device = %dev.name(), device_type = ?dev.device_type, "Skipping non-physical block device");
            }
            keep
        })
        .collect();

    debug!(total, physical = disks.len(), "Block device inventory parsed");
    Ok(disks)
}

/// Accept strings or numbers, trimming padding; empty strings become `None`.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept `true`/`false`, `"1"`/`"0"` or `1`/`0`; anything else is false.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        Some(Value::Number(n)) => n.as_u64() == Some(1),
        _ => false,
    })
}
