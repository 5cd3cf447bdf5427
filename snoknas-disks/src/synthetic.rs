//! Synthetic disk fleet for development and unprivileged hosts.
//!
//! The fleet models a full 8-bay rack: six 16 TB data drives and a two-drive
//! SSD cache tier. Two bays are pinned to anomalies so dashboards always have
//! something to flag: bay 2 runs hot and bay 5 reports a degraded drive.

use rand::Rng;

use crate::record::DiskRecordBuilder;
use crate::types::{DiskHealth, DiskRecord, SmartStatus};

/// Number of disks in the synthetic fleet.
pub const FLEET_SIZE: usize = 8;

/// Bays from this index on hold cache SSDs.
const FIRST_SSD_INDEX: usize = 6;

/// Bay forced to an overheating temperature.
pub const OVERHEATING_INDEX: usize = 2;
pub const OVERHEATING_TEMPERATURE: i64 = 56;

/// Bay forced to WARNING / Degraded.
pub const DEGRADED_INDEX: usize = 5;

/// Inclusive band for healthy drive temperatures.
pub const NORMAL_TEMPERATURE_RANGE: std::ops::RangeInclusive<i64> = 32..=45;

const HDD_MODELS: [&str; 3] = ["SnokDrive Titan 16TB", "IronWolf Pro 12TB", "Exos X20"];
const SSD_MODEL: &str = "Samsung 870 EVO";

/// Generate a fresh fleet using the thread-local RNG.
pub fn generate_fleet() -> Vec<DiskRecord> {
    generate_fleet_with(&mut rand::thread_rng())
}

/// Generate a fleet from the given RNG.
pub fn generate_fleet_with<R: Rng>(rng: &mut R) -> Vec<DiskRecord> {
    (0..FLEET_SIZE).map(|index| synthetic_disk(index, &mut *rng)).collect()
}

fn synthetic_disk<R: Rng>(index: usize, rng: &mut R) -> DiskRecord {
    let is_ssd = index >= FIRST_SSD_INDEX;

    let model = if is_ssd {
        SSD_MODEL
    } else {
        HDD_MODELS[rng.gen_range(0..HDD_MODELS.len())]
    };

    let temperature = if index == OVERHEATING_INDEX {
        OVERHEATING_TEMPERATURE
    } else {
        rng.gen_range(NORMAL_TEMPERATURE_RANGE)
    };

    let (health, status) = if index == DEGRADED_INDEX {
        (DiskHealth::Warning, SmartStatus::Degraded)
    } else {
        (DiskHealth::Good, SmartStatus::Passed)
    };

    DiskRecordBuilder::new(bay_name(index), !is_ssd)
        .size(if is_ssd { "4 TB" } else { "16 TB" })
        .model(model)
        .serial(format!("SNK-{}-X{}", rng.gen_range(10000..=99999), index))
        .interface("sata")
        .temperature(temperature)
        .health(health, status)
        .power_on_hours(rng.gen_range(5000..=45000))
        .build()
}

/// `sda`, `sdb`, ... for bay 0, 1, ...
fn bay_name(index: usize) -> String {
    let letter = char::from(b'a' + (index % 26) as u8);
    format!("sd{}", letter)
}
