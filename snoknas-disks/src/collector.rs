//! The disk status collector.

use tracing::{debug, error, info, instrument, warn};

use crate::command::{CommandRunner, SystemCommandRunner};
use crate::error::DiskError;
use crate::inventory::{self, BlockDevice};
use crate::record::DiskRecordBuilder;
use crate::smart;
use crate::synthetic;
use crate::types::{CollectorMode, DiskRecord};

/// Paths (or names looked up on `PATH`) of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub lsblk: String,
    pub smartctl: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            lsblk: "lsblk".to_string(),
            smartctl: "smartctl".to_string(),
        }
    }
}

/// Reports the physical disks of this host.
///
/// The collector holds no mutable state: every [`collect`](Self::collect)
/// call queries the host (or generates a synthetic fleet) from scratch, so a
/// single instance can be shared between request handlers.
pub struct DiskStatusCollector {
    mode: CollectorMode,
    tools: ToolPaths,
    runner: Box<dyn CommandRunner>,
}

impl DiskStatusCollector {
    /// Create a collector that runs the real tools from `PATH`.
    pub fn new(mode: CollectorMode) -> Self {
        Self::with_runner(mode, Box::new(SystemCommandRunner))
    }

    /// Create a collector with a custom command runner.
    pub fn with_runner(mode: CollectorMode, runner: Box<dyn CommandRunner>) -> Self {
        info!(mode = %mode, "Creating disk status collector");
        Self {
            mode,
            tools: ToolPaths::default(),
            runner,
        }
    }

    /// Override the tool locations.
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    pub fn mode(&self) -> CollectorMode {
        self.mode
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// Collect the current disk list.
    ///
    /// Never fails. In live mode an inventory failure yields an empty list,
    /// and a diagnostic failure leaves that disk's health UNKNOWN.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn collect(&self) -> Vec<DiskRecord> {
        let disks = match self.mode {
            CollectorMode::Dummy => synthetic::generate_fleet(),
            CollectorMode::Live => self.collect_live(),
        };
        debug!(count = disks.len(), "Disk collection complete");
        disks
    }

    fn collect_live(&self) -> Vec<DiskRecord> {
        let devices = match inventory::query_physical_disks(self.runner.as_ref(), &self.tools.lsblk) {
            Ok(devices) => devices,
            Err(e) => {
                error!(error = %e, tool = %self.tools.lsblk, "Block device inventory failed");
                return Vec::new();
            }
        };

        devices.iter().map(|device| self.probe_device(device)).collect()
    }

    /// Build one record, enriching it with SMART data when available.
    fn probe_device(&self, device: &BlockDevice) -> DiskRecord {
        let builder = DiskRecordBuilder::from_block_device(device);
        let device_path = format!("/dev/{}", device.name());

        match smart::query_smart(self.runner.as_ref(), &self.tools.smartctl, &device_path) {
            Ok(summary) => {
                debug!(device = %device_path, summary = ?summary, "SMART data collected");
                builder.apply_smart(&summary).build()
            }
            Err(e) => {
                match &e {
                    DiskError::ExecutableMissing { .. } => {
                        error!(error = %e, device = %device_path, "smartctl is not installed")
                    }
                    _ => warn!(error = %e, device = %device_path, "SMART query failed, health unknown"),
                }
                builder.build()
            }
        }
    }
}

impl std::fmt::Debug for DiskStatusCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskStatusCollector")
            .field("mode", &self.mode)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}
