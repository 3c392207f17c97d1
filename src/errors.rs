/*!
 * Error types for the subcheck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when probing a video for its duration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The probe binary could not be spawned at all
    #[error("Probe tool not found: {0}")]
    ToolNotFound(String),

    /// The probe did not finish in time and was killed
    #[error("Probe timed out after {timeout_secs} seconds")]
    Timeout {
        /// Timeout that expired
        timeout_secs: u64,
    },

    /// The probe ran but exited with a failure status
    #[error("Probe failed: {0}")]
    ExecutionFailed(String),

    /// The probe printed something that is not a duration
    #[error("Invalid probe output: {0:?}")]
    InvalidOutput(String),
}

impl ProbeError {
    /// Whether this error makes every further probe pointless.
    ///
    /// A missing probe binary aborts the run; everything else is recorded
    /// against the single file and the run goes on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ToolNotFound(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid command line input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Unrecoverable probe error
    #[error("Probe error for {path:?}: {source}")]
    Probe {
        /// File being probed when the error occurred
        path: PathBuf,
        /// Underlying probe error
        #[source]
        source: ProbeError,
    },

    /// Error while writing a report
    #[error("Report error: {0}")]
    Report(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Report(error.to_string())
    }
}
