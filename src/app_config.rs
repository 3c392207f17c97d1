use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::compliance::TimeLimits;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and overriding the compliance thresholds.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum video duration in minutes
    #[serde(default = "default_time_limit_minutes")]
    pub time_limit_minutes: f64,

    /// Seconds a video may exceed the limit before it is flagged
    #[serde(default = "default_tolerance_seconds")]
    pub tolerance_seconds: f64,

    /// Seconds to wait for a single duration probe
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Probe binary, looked up on PATH unless absolute
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Where the reports are written; the working directory when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_time_limit_minutes() -> f64 {
    15.0
}

fn default_tolerance_seconds() -> f64 {
    30.0
}

fn default_probe_timeout_secs() -> u64 {
    60
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.time_limit_minutes.is_finite() || self.time_limit_minutes < 0.0 {
            return Err(anyhow!(
                "Time limit must be a non-negative number of minutes, got {}",
                self.time_limit_minutes
            ));
        }

        if !self.tolerance_seconds.is_finite() || self.tolerance_seconds < 0.0 {
            return Err(anyhow!(
                "Tolerance must be a non-negative number of seconds, got {}",
                self.tolerance_seconds
            ));
        }

        if self.probe_timeout_secs == 0 {
            return Err(anyhow!("Probe timeout must be at least one second"));
        }

        if self.ffprobe_path.trim().is_empty() {
            return Err(anyhow!("Probe tool path cannot be empty"));
        }

        Ok(())
    }

    /// Thresholds used by the compliance evaluator
    pub fn limits(&self) -> TimeLimits {
        TimeLimits::new(self.time_limit_minutes, self.tolerance_seconds)
    }

    /// Directory the reports go to, falling back to the given working directory
    pub fn resolve_output_dir(&self, working_dir: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => working_dir.join(dir),
            None => working_dir.to_path_buf(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit_minutes: default_time_limit_minutes(),
            tolerance_seconds: default_tolerance_seconds(),
            probe_timeout_secs: default_probe_timeout_secs(),
            ffprobe_path: default_ffprobe_path(),
            output_dir: None,
            log_level: LogLevel::default(),
        }
    }
}
