//! Disk record construction.
//!
//! A record starts from the pre-diagnostic defaults (unknown health, no
//! readings) and SMART results are layered on top, field by field. Fields the
//! drive did not report keep their defaults.

use serde_json::Value;

use crate::inventory::BlockDevice;
use crate::smart::SmartSummary;
use crate::types::{DiskHealth, DiskKind, DiskRecord, Reading, SmartStatus, NOT_AVAILABLE};

const UNKNOWN_MODEL: &str = "Unknown Model";
const UNKNOWN_INTERFACE: &str = "UNKNOWN";

/// Builder for [`DiskRecord`].
#[derive(Debug, Clone)]
pub struct DiskRecordBuilder {
    record: DiskRecord,
}

impl DiskRecordBuilder {
    /// Start a record with identity fields blank and all diagnostics unknown.
    pub fn new(name: impl Into<String>, rotational: bool) -> Self {
        Self {
            record: DiskRecord {
                name: name.into(),
                size: String::new(),
                model: UNKNOWN_MODEL.to_string(),
                serial: NOT_AVAILABLE.to_string(),
                rotational,
                kind: DiskKind::from_rotational(rotational),
                interface: UNKNOWN_INTERFACE.to_string(),
                temperature: Reading::NotAvailable,
                health: DiskHealth::Unknown,
                smart_status: SmartStatus::Unknown,
                power_on_hours: Reading::NotAvailable,
                partitions: Vec::new(),
            },
        }
    }

    /// Start from an lsblk entry, carrying its partitions through unchanged.
    pub fn from_block_device(device: &BlockDevice) -> Self {
        let mut builder = Self::new(device.name(), device.rota)
            .partitions(device.children.clone());

        if let Some(size) = &device.size {
            builder = builder.size(size.as_str());
        }
        if let Some(model) = &device.model {
            builder = builder.model(model.as_str());
        }
        if let Some(serial) = &device.serial {
            builder = builder.serial(serial.as_str());
        }
        if let Some(tran) = &device.tran {
            builder = builder.interface(tran.as_str());
        }

        builder
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.record.size = size.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.record.model = model.into();
        self
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.record.serial = serial.into();
        self
    }

    /// Set the transport; stored uppercased ("sata" becomes "SATA").
    pub fn interface(mut self, transport: &str) -> Self {
        let transport = transport.trim();
        self.record.interface = if transport.is_empty() {
            UNKNOWN_INTERFACE.to_string()
        } else {
            transport.to_uppercase()
        };
        self
    }

    pub fn partitions(mut self, partitions: Vec<Value>) -> Self {
        self.record.partitions = partitions;
        self
    }

    pub fn temperature(mut self, celsius: i64) -> Self {
        self.record.temperature = Reading::Value(celsius);
        self
    }

    pub fn health(mut self, health: DiskHealth, status: SmartStatus) -> Self {
        self.record.health = health;
        self.record.smart_status = status;
        self
    }

    pub fn power_on_hours(mut self, hours: u64) -> Self {
        self.record.power_on_hours = Reading::Value(hours);
        self
    }

    /// Overwrite only the fields present in the SMART summary.
    pub fn apply_smart(mut self, summary: &SmartSummary) -> Self {
        if let Some(celsius) = summary.temperature {
            self = self.temperature(celsius);
        }
        if let Some(passed) = summary.passed {
            let (health, status) = SmartStatus::from_verdict(passed);
            self = self.health(health, status);
        }
        if let Some(hours) = summary.power_on_hours {
            self = self.power_on_hours(hours);
        }
        self
    }

    pub fn build(self) -> DiskRecord {
        self.record
    }
}
