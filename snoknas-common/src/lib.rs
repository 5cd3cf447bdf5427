//! # SnokNAS Common
//!
//! Shared utilities for the SnokNAS components.
//!
//! ## Logging
//!
//! ```rust,no_run
//! use snoknas_common::init_logging;
//!
//! // Initialize with level (RUST_LOG wins when set)
//! init_logging("info").unwrap();
//! tracing::info!(component = "disks", "Collector ready");
//! ```

pub mod logging;

pub use logging::{init_logging, init_logging_json};
