/*!
 * Mock duration prober for testing.
 *
 * Durations and failures are registered per file name, so a test can lay out
 * a directory of empty files and still drive every branch of the evaluator:
 * - `MockProber::new().with_duration("a.mp4", 600.0)` - probe succeeds
 * - `MockProber::new().with_failure("b.mp4", error)` - probe fails
 *
 * Files that were never registered fail with `ProbeError::InvalidOutput`,
 * which is what ffprobe does for files that are not media.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::errors::ProbeError;
use crate::probe::DurationProber;

/// Mock prober answering from a table of file names
#[derive(Debug, Default)]
pub struct MockProber {
    /// Outcome per file name
    outcomes: HashMap<String, Result<f64, ProbeError>>,
    /// File names in the order they were probed
    calls: Mutex<Vec<String>>,
}

impl MockProber {
    /// Create an empty mock prober
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful probe result in seconds
    pub fn with_duration(mut self, file_name: &str, seconds: f64) -> Self {
        self.outcomes.insert(file_name.to_string(), Ok(seconds));
        self
    }

    /// Register a successful probe result in minutes
    pub fn with_minutes(self, file_name: &str, minutes: f64) -> Self {
        self.with_duration(file_name, minutes * 60.0)
    }

    /// Register a failing probe
    pub fn with_failure(mut self, file_name: &str, error: ProbeError) -> Self {
        self.outcomes.insert(file_name.to_string(), Err(error));
        self
    }

    /// File names probed so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of probes performed so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl DurationProber for MockProber {
    async fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(file_name.clone());
        }

        match self.outcomes.get(&file_name) {
            Some(outcome) => outcome.clone(),
            None => Err(ProbeError::InvalidOutput(String::new())),
        }
    }
}
