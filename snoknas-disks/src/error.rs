//! Error types for disk discovery.

use thiserror::Error;

/// Errors that can occur while querying external disk tools.
///
/// None of these reach the caller of
/// [`DiskStatusCollector::collect`](crate::DiskStatusCollector::collect);
/// the collector logs them and degrades the affected records.
#[derive(Error, Debug)]
pub enum DiskError {
    /// The tool is not installed or not on `PATH`.
    #[error("Executable not found: {program}")]
    ExecutableMissing {
        program: String,
    },

    /// The tool ran but exited unsuccessfully, or could not be spawned.
    #[error("{program} failed (exit code {code:?}): {stderr}")]
    ProcessFailure {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The tool's output was not the JSON document we expected.
    #[error("Malformed output from {source_name}: {error}")]
    MalformedOutput {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },
}

impl DiskError {
    /// Build a [`DiskError::MalformedOutput`] for the named tool.
    pub fn malformed(source_name: impl Into<String>, error: serde_json::Error) -> Self {
        Self::MalformedOutput {
            source_name: source_name.into(),
            error,
        }
    }
}

/// Result type alias for disk operations.
pub type Result<T> = std::result::Result<T, DiskError>;
