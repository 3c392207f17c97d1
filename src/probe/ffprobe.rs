use async_trait::async_trait;
use log::{debug, warn};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::ProbeError;
use crate::probe::DurationProber;

// @module: ffprobe-backed duration probe

/// Probes durations by running ffprobe once per file
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    // @field: Binary to execute
    program: String,

    // @field: Time allowed for one probe
    timeout: Duration,
}

impl FfprobeProber {
    /// Create a prober for the given binary and per-file timeout
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Arguments that make ffprobe print nothing but the container duration
    pub fn duration_args(path: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ]
        .iter()
        .map(|a| a.into())
        .collect();
        args.push(path.as_os_str().to_os_string());
        args
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe", Duration::from_secs(60))
    }
}

/// Parse ffprobe's plain duration output into seconds
pub fn parse_duration_output(stdout: &str) -> Result<f64, ProbeError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(ProbeError::InvalidOutput(String::new()));
    }

    // A file with several format sections prints one line each; the first wins
    let first_line = trimmed.lines().next().unwrap_or(trimmed).trim();

    match first_line.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(ProbeError::InvalidOutput(first_line.to_string())),
    }
}

#[async_trait]
impl DurationProber for FfprobeProber {
    async fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        debug!("Probing duration of {:?}", path);

        let child = Command::new(&self.program)
            .args(Self::duration_args(path))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = child => {
                result.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        ProbeError::ToolNotFound(self.program.clone())
                    } else {
                        ProbeError::ExecutionFailed(format!("Failed to execute {}: {}", self.program, e))
                    }
                })?
            },
            _ = tokio::time::sleep(self.timeout) => {
                warn!("{} timed out on {:?}", self.program, path);
                return Err(ProbeError::Timeout { timeout_secs: self.timeout.as_secs() });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(ProbeError::ExecutionFailed(if message.is_empty() {
                format!("exit status {}", output.status)
            } else {
                message.to_string()
            }));
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout))
    }
}
