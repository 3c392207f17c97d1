/*!
 * Compliance evaluation of video submissions.
 *
 * Every video candidate is judged on its own by `evaluate_file`, a pure
 * function of the file, the subtitle candidates and the outcome of its
 * duration probe. The resulting `FileVerdict`s are what both report views
 * are built from.
 *
 * Checks, which are independent of each other:
 * - format: only MP4 is accepted; other files are never probed
 * - duration: over time when strictly above limit + tolerance
 * - subtitles present: some subtitle file name starts with `"<stem>."`
 * - subtitle format: one of those matches is an SRT file
 */

use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;

use crate::classifier::{Classification, MediaFile, SUBTITLE_EXTENSION};
use crate::errors::{AppError, ProbeError};
use crate::probe::DurationProber;

/// Duration thresholds, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeLimits {
    // @field: Nominal limit
    pub limit_seconds: f64,

    // @field: Allowed excess before a video is flagged
    pub tolerance_seconds: f64,
}

impl TimeLimits {
    /// Build limits from a limit in minutes and a tolerance in seconds
    pub fn new(limit_minutes: f64, tolerance_seconds: f64) -> Self {
        Self {
            limit_seconds: limit_minutes * 60.0,
            tolerance_seconds,
        }
    }

    /// Longest duration that is still accepted
    pub fn threshold(&self) -> f64 {
        self.limit_seconds + self.tolerance_seconds
    }

    /// Seconds over the nominal limit, if the duration breaks the threshold.
    ///
    /// The overage is measured against the limit itself, not limit + tolerance,
    /// and rounded half to even.
    pub fn overage(&self, duration_seconds: f64) -> Option<i64> {
        if duration_seconds > self.threshold() {
            Some((duration_seconds - self.limit_seconds).round_ties_even() as i64)
        } else {
            None
        }
    }
}

impl Default for TimeLimits {
    fn default() -> Self {
        Self::new(15.0, 30.0)
    }
}

/// One reason a submission is not compliant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Video is longer than limit + tolerance
    OverTimeLimit { overage_seconds: i64 },
    /// Video is not an MP4 file; extension is lowercase without the dot
    WrongVideoFormat { extension: String },
    /// No subtitle candidate belongs to the video
    MissingSubtitles,
    /// Subtitles exist but none is SRT; extension is uppercase without the dot
    WrongSubtitleFormat { extension: String },
}

impl Violation {
    /// Human readable description used in the per-submission report
    pub fn description(&self) -> String {
        match self {
            Self::OverTimeLimit { overage_seconds } => {
                format!("Over time limit by {} seconds", overage_seconds)
            }
            Self::WrongVideoFormat { extension } => {
                format!("Wrong video format ({}) - MP4 file required", display_extension(extension))
            }
            Self::MissingSubtitles => "No subtitles - SRT file required".to_string(),
            Self::WrongSubtitleFormat { extension } => {
                format!("Wrong subtitle format ({}) - SRT file required", display_extension(extension))
            }
        }
    }
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "no extension".to_string()
    } else {
        extension.to_uppercase()
    }
}

/// What is known about a video's duration
#[derive(Debug, Clone, PartialEq)]
pub enum DurationOutcome {
    /// Not an MP4 file, so never probed
    NotProbed,
    /// Probe succeeded
    Measured(f64),
    /// Probe failed for this file only
    Failed(ProbeError),
}

/// Immutable result of evaluating one video candidate
#[derive(Debug, Clone, PartialEq)]
pub struct FileVerdict {
    pub video: MediaFile,
    pub duration: DurationOutcome,
    /// Violations in report order
    pub violations: Vec<Violation>,
    /// MP4, measured within the limit and paired with an SRT file.
    ///
    /// Derived on its own rather than from `violations` being empty; the
    /// per-submission report keys its "No issues found" marker on this flag.
    pub clean: bool,
}

impl FileVerdict {
    /// The probe error recorded for this file, if any
    pub fn probe_failure(&self) -> Option<&ProbeError> {
        match &self.duration {
            DurationOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Descriptions for the per-submission report, probe notice first
    pub fn descriptions(&self) -> Vec<String> {
        let mut descriptions = Vec::with_capacity(self.violations.len() + 1);
        if let Some(error) = self.probe_failure() {
            descriptions.push(format!("Duration could not be determined ({})", error));
        }
        descriptions.extend(self.violations.iter().map(Violation::description));
        descriptions
    }
}

/// Subtitle candidates whose file name starts with `"<stem>."`.
///
/// The video stem is lowercase while subtitle names are compared as they are
/// on disk, so `Talk.srt` does not pair with `Talk.mp4`. The match is a
/// prefix match: `talk1.5.srt` also pairs with `talk1.mp4`.
pub fn matching_subtitles<'a>(video: &MediaFile, subtitles: &'a [MediaFile]) -> Vec<&'a MediaFile> {
    let prefix = format!("{}.", video.stem);
    subtitles
        .iter()
        .filter(|s| s.file_name.starts_with(&prefix))
        .collect()
}

/// Evaluate one video against every rule
pub fn evaluate_file(
    video: &MediaFile,
    subtitles: &[MediaFile],
    duration: DurationOutcome,
    limits: &TimeLimits,
) -> FileVerdict {
    let mut violations = Vec::new();

    let mut within_limit = false;
    if let DurationOutcome::Measured(seconds) = duration {
        match limits.overage(seconds) {
            Some(overage_seconds) => violations.push(Violation::OverTimeLimit { overage_seconds }),
            None => within_limit = true,
        }
    }

    if !video.is_container() {
        violations.push(Violation::WrongVideoFormat {
            extension: video.extension.clone(),
        });
    }

    let matches = matching_subtitles(video, subtitles);
    let has_srt = matches.iter().any(|s| s.extension == SUBTITLE_EXTENSION);

    match matches.first() {
        None => violations.push(Violation::MissingSubtitles),
        Some(first) if !has_srt => violations.push(Violation::WrongSubtitleFormat {
            extension: first.extension.to_uppercase(),
        }),
        Some(_) => {}
    }

    let clean = video.is_container() && within_limit && has_srt;

    FileVerdict {
        video: video.clone(),
        duration,
        violations,
        clean,
    }
}

/// Evaluates every video candidate of a directory, probing MP4 files
#[derive(Debug, Clone)]
pub struct ComplianceEvaluator {
    prober: Arc<dyn DurationProber>,
    limits: TimeLimits,
}

impl ComplianceEvaluator {
    /// Create an evaluator with the given prober and thresholds
    pub fn new(prober: Arc<dyn DurationProber>, limits: TimeLimits) -> Self {
        Self { prober, limits }
    }

    /// Thresholds in use
    pub fn limits(&self) -> &TimeLimits {
        &self.limits
    }

    /// Evaluate all videos of `classification`, which was listed from `dir`
    pub async fn evaluate(&self, dir: &Path, classification: &Classification) -> Result<Vec<FileVerdict>, AppError> {
        self.evaluate_with_progress(dir, classification, |_| {}).await
    }

    /// Same as `evaluate`, calling `on_verdict` after each file.
    ///
    /// Files are handled one at a time in listing order. A probe failure is
    /// recorded in that file's verdict; only a missing probe tool stops the run.
    pub async fn evaluate_with_progress<F>(
        &self,
        dir: &Path,
        classification: &Classification,
        mut on_verdict: F,
    ) -> Result<Vec<FileVerdict>, AppError>
    where
        F: FnMut(&FileVerdict),
    {
        let mut verdicts = Vec::with_capacity(classification.videos.len());

        for video in &classification.videos {
            let duration = if video.is_container() {
                let path = dir.join(&video.file_name);
                match self.prober.probe_duration(&path).await {
                    Ok(seconds) => {
                        debug!("{} lasts {:.2} seconds", video.file_name, seconds);
                        DurationOutcome::Measured(seconds)
                    }
                    Err(error) if error.is_fatal() => {
                        return Err(AppError::Probe { path, source: error });
                    }
                    Err(error) => {
                        warn!("Could not determine duration of {}: {}", video.file_name, error);
                        DurationOutcome::Failed(error)
                    }
                }
            } else {
                DurationOutcome::NotProbed
            };

            let verdict = evaluate_file(video, &classification.subtitles, duration, &self.limits);
            on_verdict(&verdict);
            verdicts.push(verdict);
        }

        Ok(verdicts)
    }
}
