/*!
 * Report views over the per-file verdicts and the JSON writer.
 *
 * Both views are reduced from the same verdict list:
 * - `CategoryReport`: violation category -> offending files
 * - `SubmissionReport`: submission stem -> violation descriptions
 *
 * Maps are ordered so the same directory always yields the same documents.
 */

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::compliance::{FileVerdict, Violation};
use crate::file_utils::FileManager;

/// File name of the per-category report
pub const CATEGORY_REPORT_FILE: &str = "per-category-report.json";

/// File name of the per-submission report
pub const SUBMISSION_REPORT_FILE: &str = "per-submission-report.json";

/// Sentinel entry for a submission without issues
pub const NO_ISSUES_FOUND: &str = "No issues found";

/// Offending files grouped by violation category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// File name -> lowercase extension
    #[serde(rename = "Wrong video format")]
    pub wrong_video_format: BTreeMap<String, String>,

    /// File names in listing order
    #[serde(rename = "No subtitles")]
    pub no_subtitles: Vec<String>,

    /// File name -> uppercase extension of the first matched subtitle
    #[serde(rename = "Wrong subtitle format")]
    pub wrong_subtitle_format: BTreeMap<String, String>,

    /// File name -> whole seconds over the nominal limit
    #[serde(rename = "Over time limit")]
    pub over_time_limit: BTreeMap<String, i64>,
}

impl CategoryReport {
    /// Invert the verdicts into an index by category
    pub fn from_verdicts(verdicts: &[FileVerdict]) -> Self {
        let mut report = Self::default();

        for verdict in verdicts {
            let file_name = &verdict.video.file_name;
            for violation in &verdict.violations {
                match violation {
                    Violation::WrongVideoFormat { extension } => {
                        report.wrong_video_format.insert(file_name.clone(), extension.clone());
                    }
                    Violation::MissingSubtitles => {
                        report.no_subtitles.push(file_name.clone());
                    }
                    Violation::WrongSubtitleFormat { extension } => {
                        report.wrong_subtitle_format.insert(file_name.clone(), extension.clone());
                    }
                    Violation::OverTimeLimit { overage_seconds } => {
                        report.over_time_limit.insert(file_name.clone(), *overage_seconds);
                    }
                }
            }
        }

        report
    }

    /// Total number of entries across all categories
    pub fn total_entries(&self) -> usize {
        self.wrong_video_format.len()
            + self.no_subtitles.len()
            + self.wrong_subtitle_format.len()
            + self.over_time_limit.len()
    }

    /// Whether any category mentions the given file
    pub fn mentions(&self, file_name: &str) -> bool {
        self.wrong_video_format.contains_key(file_name)
            || self.no_subtitles.iter().any(|f| f == file_name)
            || self.wrong_subtitle_format.contains_key(file_name)
            || self.over_time_limit.contains_key(file_name)
    }
}

/// Violation descriptions grouped by submission stem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionReport {
    entries: BTreeMap<String, Vec<String>>,
}

impl SubmissionReport {
    /// Build the per-submission view.
    ///
    /// A submission is reported as "No issues found" only when every video
    /// sharing its stem is clean; otherwise the descriptions of its videos that
    /// are not clean are concatenated in listing order.
    pub fn from_verdicts(verdicts: &[FileVerdict]) -> Self {
        let mut grouped: BTreeMap<String, (bool, Vec<String>)> = BTreeMap::new();

        for verdict in verdicts {
            let (all_clean, descriptions) = grouped
                .entry(verdict.video.stem.clone())
                .or_insert_with(|| (true, Vec::new()));

            if verdict.clean {
                continue;
            }

            *all_clean = false;
            descriptions.extend(verdict.descriptions());
        }

        let entries = grouped
            .into_iter()
            .map(|(stem, (all_clean, descriptions))| {
                if all_clean {
                    (stem, vec![NO_ISSUES_FOUND.to_string()])
                } else {
                    (stem, descriptions)
                }
            })
            .collect();

        Self { entries }
    }

    /// Descriptions recorded for a submission stem
    pub fn get(&self, stem: &str) -> Option<&[String]> {
        self.entries.get(stem).map(Vec::as_slice)
    }

    /// Whether the submission was found without issues
    pub fn is_clean(&self, stem: &str) -> bool {
        matches!(self.get(stem), Some([only]) if only == NO_ISSUES_FOUND)
    }

    /// Number of submissions in the report
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no submissions
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of submissions without issues
    pub fn clean_count(&self) -> usize {
        self.entries.keys().filter(|stem| self.is_clean(stem)).count()
    }

    /// Iterate over submissions in stem order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

/// Locations of the written reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub category: PathBuf,
    pub submission: PathBuf,
}

/// Writes both reports as indented JSON into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `output_dir`
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Paths the reports are written to
    pub fn paths(&self) -> ReportPaths {
        ReportPaths {
            category: self.output_dir.join(CATEGORY_REPORT_FILE),
            submission: self.output_dir.join(SUBMISSION_REPORT_FILE),
        }
    }

    /// Serialize and write both reports, replacing any previous run's files
    pub fn write(&self, category: &CategoryReport, submission: &SubmissionReport) -> Result<ReportPaths> {
        let paths = self.paths();

        let category_json = serde_json::to_string_pretty(category)
            .context("Failed to serialize per-category report")?;
        FileManager::write_atomically(&paths.category, &category_json)?;
        debug!("Wrote {:?}", paths.category);

        let submission_json = serde_json::to_string_pretty(submission)
            .context("Failed to serialize per-submission report")?;
        FileManager::write_atomically(&paths.submission, &submission_json)?;
        debug!("Wrote {:?}", paths.submission);

        Ok(paths)
    }
}
