/*!
 * # subcheck - Conference video submission checker
 *
 * A Rust library for checking a folder of submitted talk videos and their
 * subtitle files against the submission requirements.
 *
 * ## Features
 *
 * - Classify a flat folder into video and subtitle candidates
 * - Probe MP4 durations with ffprobe, with a per-file timeout
 * - Check video format, duration, subtitle presence and subtitle format
 * - Write a per-category and a per-submission JSON report
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `classifier`: Video / subtitle classification of file names
 * - `probe`: Duration probing:
 *   - `probe::ffprobe`: ffprobe-backed prober
 *   - `probe::mock`: Canned prober for tests
 * - `compliance`: Per-file evaluation of the submission rules
 * - `report`: Report views and JSON writer
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod compliance;
pub mod errors;
pub mod file_utils;
pub mod probe;
pub mod report;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use classifier::{classify, Classification, MediaFile};
pub use compliance::{evaluate_file, ComplianceEvaluator, DurationOutcome, FileVerdict, TimeLimits, Violation};
pub use errors::{AppError, ProbeError};
pub use report::{CategoryReport, ReportWriter, SubmissionReport};
