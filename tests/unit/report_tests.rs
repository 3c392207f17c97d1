/*!
 * Tests for report building and writing
 */

use anyhow::Result;
use serde_json::json;
use subcheck::classifier::MediaFile;
use subcheck::compliance::{evaluate_file, DurationOutcome, FileVerdict, TimeLimits};
use subcheck::errors::ProbeError;
use subcheck::report::{
    CategoryReport, ReportWriter, SubmissionReport, CATEGORY_REPORT_FILE, NO_ISSUES_FOUND, SUBMISSION_REPORT_FILE,
};
use crate::common;

fn verdict(video: &str, subtitles: &[&str], duration: DurationOutcome) -> FileVerdict {
    let subtitles: Vec<MediaFile> = subtitles.iter().map(|n| MediaFile::from_file_name(n)).collect();
    evaluate_file(&MediaFile::from_file_name(video), &subtitles, duration, &TimeLimits::default())
}

fn scenario_verdicts() -> Vec<FileVerdict> {
    vec![
        verdict("talk1.mp4", &["talk1.srt"], DurationOutcome::Measured(12.0 * 60.0)),
        verdict("talk2.mov", &["talk2.srt"], DurationOutcome::NotProbed),
        verdict("talk3.mp4", &["talk3.srt"], DurationOutcome::Measured(20.0 * 60.0)),
        verdict("talk4.mp4", &[], DurationOutcome::Measured(10.0 * 60.0)),
        verdict("talk5.mp4", &["talk5.sbv"], DurationOutcome::Measured(10.0 * 60.0)),
    ]
}

#[test]
fn test_category_report_withScenarios_shouldIndexByCategory() -> Result<()> {
    let report = CategoryReport::from_verdicts(&scenario_verdicts());

    let value = serde_json::to_value(&report)?;
    assert_eq!(
        value,
        json!({
            "Wrong video format": {"talk2.mov": "mov"},
            "No subtitles": ["talk4.mp4"],
            "Wrong subtitle format": {"talk5.mp4": "SBV"},
            "Over time limit": {"talk3.mp4": 300}
        })
    );
    assert!(!report.mentions("talk1.mp4"));
    assert_eq!(report.total_entries(), 4);
    Ok(())
}

#[test]
fn test_category_report_shouldSerializeKeysInFixedOrder() -> Result<()> {
    let report = CategoryReport::default();

    let text = serde_json::to_string(&report)?;

    assert_eq!(
        text,
        r#"{"Wrong video format":{},"No subtitles":[],"Wrong subtitle format":{},"Over time limit":{}}"#
    );
    Ok(())
}

#[test]
fn test_submission_report_withScenarios_shouldDescribeEachStem() -> Result<()> {
    let report = SubmissionReport::from_verdicts(&scenario_verdicts());

    let value = serde_json::to_value(&report)?;
    assert_eq!(
        value,
        json!({
            "talk1": ["No issues found"],
            "talk2": ["Wrong video format (MOV) - MP4 file required"],
            "talk3": ["Over time limit by 300 seconds"],
            "talk4": ["No subtitles - SRT file required"],
            "talk5": ["Wrong subtitle format (SBV) - SRT file required"]
        })
    );
    assert_eq!(report.len(), 5);
    assert_eq!(report.clean_count(), 1);
    assert!(report.is_clean("talk1"));
    assert!(!report.is_clean("talk2"));
    Ok(())
}

#[test]
fn test_submission_report_withUppercaseName_shouldKeyByLowercaseStem() {
    let verdicts = vec![verdict("TALK9.mov", &[], DurationOutcome::NotProbed)];

    let report = SubmissionReport::from_verdicts(&verdicts);

    assert!(report.get("talk9").is_some());
    assert!(report.get("TALK9").is_none());
}

#[test]
fn test_submission_report_withProbeFailure_shouldCarryNotice() {
    let verdicts = vec![verdict(
        "talk.mp4",
        &["talk.srt"],
        DurationOutcome::Failed(ProbeError::InvalidOutput("N/A".to_string())),
    )];

    let report = SubmissionReport::from_verdicts(&verdicts);

    assert_eq!(
        report.get("talk").unwrap(),
        ["Duration could not be determined (Invalid probe output: \"N/A\")".to_string()]
    );
}

#[test]
fn test_submission_report_withSharedStem_shouldMergeVideos() {
    let verdicts = vec![
        verdict("talk.mp4", &["talk.srt"], DurationOutcome::Measured(60.0)),
        verdict("talk.mov", &["talk.srt"], DurationOutcome::NotProbed),
    ];

    let report = SubmissionReport::from_verdicts(&verdicts);

    assert_eq!(report.len(), 1);
    assert_eq!(report.get("talk").unwrap(), ["Wrong video format (MOV) - MP4 file required".to_string()]);
}

#[test]
fn test_submission_report_withSharedStemAllClean_shouldReportNoIssues() {
    let verdicts = vec![
        verdict("talk.mp4", &["talk.srt"], DurationOutcome::Measured(60.0)),
        verdict("TALK.mp4", &["talk.srt"], DurationOutcome::Measured(120.0)),
    ];

    let report = SubmissionReport::from_verdicts(&verdicts);

    assert_eq!(report.get("talk").unwrap(), [NO_ISSUES_FOUND.to_string()]);
}

#[test]
fn test_report_writer_shouldWriteIndentedJsonWithFixedNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let verdicts = scenario_verdicts();
    let writer = ReportWriter::new(temp_dir.path());

    let paths = writer.write(&CategoryReport::from_verdicts(&verdicts), &SubmissionReport::from_verdicts(&verdicts))?;

    assert_eq!(paths.category, temp_dir.path().join(CATEGORY_REPORT_FILE));
    assert_eq!(paths.submission, temp_dir.path().join(SUBMISSION_REPORT_FILE));

    let text = std::fs::read_to_string(&paths.category)?;
    assert!(text.starts_with("{\n  \"Wrong video format\": {\n    \"talk2.mov\": \"mov\"\n  },"));

    let submission = common::read_json(&paths.submission)?;
    assert_eq!(submission["talk1"], json!(["No issues found"]));
    Ok(())
}

#[test]
fn test_report_writer_secondRun_shouldOverwritePreviousReports() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let writer = ReportWriter::new(temp_dir.path());
    let verdicts = scenario_verdicts();
    writer.write(&CategoryReport::from_verdicts(&verdicts), &SubmissionReport::from_verdicts(&verdicts))?;

    let paths = writer.write(&CategoryReport::default(), &SubmissionReport::default())?;

    assert_eq!(common::read_json(&paths.submission)?, json!({}));
    assert_eq!(common::read_json(&paths.category)?["No subtitles"], json!([]));
    Ok(())
}
