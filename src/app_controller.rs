use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::classifier;
use crate::compliance::ComplianceEvaluator;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::probe::{DurationProber, FfprobeProber};
use crate::report::{CategoryReport, ReportPaths, ReportWriter, SubmissionReport};

// @module: Application controller for compliance checking

/// Outcome of one checking run
#[derive(Debug, Clone)]
pub struct RunSummary {
    // @field: Video candidates evaluated
    pub videos: usize,

    // @field: Subtitle candidates found
    pub subtitles: usize,

    // @field: Submissions without issues
    pub clean_submissions: usize,

    // @field: Submissions in the per-submission report
    pub submissions: usize,

    // @field: Files whose duration could not be determined
    pub probe_failures: usize,

    // @field: Both views as written
    pub category_report: CategoryReport,
    pub submission_report: SubmissionReport,

    // @field: Where the reports went
    pub paths: ReportPaths,
}

/// Main application controller for submission checking
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Duration source
    prober: Arc<dyn DurationProber>,
}

impl Controller {
    // @method: Create a new controller probing with ffprobe
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let prober = FfprobeProber::new(
            config.ffprobe_path.clone(),
            Duration::from_secs(config.probe_timeout_secs),
        );

        Ok(Self {
            config,
            prober: Arc::new(prober),
        })
    }

    // @method: Create a new controller with a custom prober
    pub fn with_prober(config: Config, prober: Arc<dyn DurationProber>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, prober })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check every file of `input_dir` and write both reports.
    ///
    /// Reports go to the configured output directory, resolved against
    /// `working_dir` when relative or unset.
    pub async fn run_folder(&self, input_dir: &Path, working_dir: &Path) -> Result<RunSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::Usage(format!(
                "Argument should be a path to a directory: {:?}",
                input_dir
            ))
            .into());
        }

        info!("Checking submissions in {:?}", input_dir);

        let listing = FileManager::list_directory(input_dir)?;
        let classification = classifier::classify(&listing);
        info!(
            "Found {} video candidate(s) and {} subtitle candidate(s)",
            classification.videos.len(),
            classification.subtitles.len()
        );

        if classification.videos.is_empty() {
            warn!("No video files found in {:?}", input_dir);
        }

        let evaluator = ComplianceEvaluator::new(self.prober.clone(), self.config.limits());
        debug!(
            "Time limit {}s, tolerance {}s",
            evaluator.limits().limit_seconds,
            evaluator.limits().tolerance_seconds
        );

        let progress_bar = Self::progress_bar(classification.videos.len());
        let verdicts = evaluator
            .evaluate_with_progress(input_dir, &classification, |verdict| {
                progress_bar.set_message(verdict.video.file_name.clone());
                progress_bar.inc(1);
            })
            .await;
        progress_bar.finish_and_clear();
        let verdicts = verdicts?;

        let category_report = CategoryReport::from_verdicts(&verdicts);
        let submission_report = SubmissionReport::from_verdicts(&verdicts);

        let output_dir = self.config.resolve_output_dir(working_dir);
        let paths = ReportWriter::new(&output_dir)
            .write(&category_report, &submission_report)
            .with_context(|| format!("Failed to write reports to {:?}", output_dir))?;

        let summary = RunSummary {
            videos: verdicts.len(),
            subtitles: classification.subtitles.len(),
            clean_submissions: submission_report.clean_count(),
            submissions: submission_report.len(),
            probe_failures: verdicts.iter().filter(|v| v.probe_failure().is_some()).count(),
            category_report,
            submission_report,
            paths,
        };

        info!(
            "{} of {} submission(s) without issues, {} category entr(y/ies)",
            summary.clean_submissions,
            summary.submissions,
            summary.category_report.total_entries()
        );
        if summary.probe_failures > 0 {
            warn!("Duration could not be determined for {} file(s)", summary.probe_failures);
        }

        Ok(summary)
    }

    // @creates: Progress bar for the evaluation loop, hidden for a single file
    fn progress_bar(total: usize) -> ProgressBar {
        if total <= 1 {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("##-"));
        progress_bar
    }
}

/// Resolve the directory the process was started from
pub fn current_working_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine the current working directory")
}
