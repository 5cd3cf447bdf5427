//! # SnokNAS Disks
//!
//! Physical disk discovery and SMART health collection for the SnokNAS
//! dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          DiskStatusCollector            │
//! │               collect()                 │
//! └─────────────────────┬───────────────────┘
//!                       │ mode
//!         ┌─────────────┴─────────────┐
//!         ▼                           ▼
//! ┌───────────────────┐     ┌───────────────────┐
//! │       Live        │     │       Dummy       │
//! │ lsblk + smartctl  │     │  8-bay synthetic  │
//! │  (CommandRunner)  │     │       fleet       │
//! └───────────────────┘     └───────────────────┘
//! ```
//!
//! Collection never fails: tool and parse errors are logged and degrade the
//! affected records (see [`DiskError`]).
//!
//! ## Usage
//!
//! ```rust
//! use snoknas_disks::{CollectorMode, DiskStatusCollector};
//!
//! let collector = DiskStatusCollector::new(CollectorMode::Dummy);
//! let disks = collector.collect();
//! assert_eq!(disks.len(), 8);
//! ```

pub mod collector;
pub mod command;
pub mod error;
pub mod inventory;
pub mod record;
pub mod smart;
pub mod synthetic;
pub mod types;

pub use collector::{DiskStatusCollector, ToolPaths};
pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use error::DiskError;
pub use record::DiskRecordBuilder;
pub use smart::SmartSummary;
pub use types::{CollectorMode, DiskHealth, DiskKind, DiskRecord, Reading, SmartStatus, NOT_AVAILABLE};
