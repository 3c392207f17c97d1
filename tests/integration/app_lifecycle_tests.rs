/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::sync::Arc;
use subcheck::app_config::Config;
use subcheck::app_controller::Controller;
use subcheck::errors::AppError;
use subcheck::probe::MockProber;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    assert_eq!(controller.config().time_limit_minutes, 15.0);
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_controller_initialization_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.tolerance_seconds = -1.0;

    assert!(Controller::with_config(config.clone()).is_err());
    assert!(Controller::with_prober(config, Arc::new(MockProber::new())).is_err());
}

/// Test that a file given as input directory is a usage error
#[test]
fn test_run_folder_withFileInsteadOfDir_shouldFailWithUsageError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "talk.mp4", "")?;
    let controller = Controller::with_prober(Config::default(), Arc::new(MockProber::new()))?;

    let result = tokio_test::block_on(async { controller.run_folder(&file, temp_dir.path()).await });

    let error = result.unwrap_err();
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::Usage(_))));
    assert!(!temp_dir.path().join("per-category-report.json").exists());
    Ok(())
}

/// Test that a missing input directory is a usage error
#[test]
fn test_run_folder_withMissingDir_shouldFailWithUsageError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_prober(Config::default(), Arc::new(MockProber::new()))?;

    let result = tokio_test::block_on(async {
        controller.run_folder(&temp_dir.path().join("missing"), temp_dir.path()).await
    });

    assert!(result.is_err());
    Ok(())
}

/// Full run through the real ffprobe code path with a stand-in binary
#[cfg(unix)]
#[test]
fn test_run_folder_withFakeFfprobe_shouldUseConfiguredBinary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let media_dir = common::create_media_dir(temp_dir.path(), &["talk1.mp4", "talk1.srt", "talk3.mp4", "talk3.srt"])?;
    // 12 minutes for talk1, 20 minutes for talk3
    let script = common::create_fake_ffprobe(
        temp_dir.path(),
        r#"for last; do :; done; case "$last" in *talk1.mp4) echo 720.0 ;; *) echo 1200.0 ;; esac"#,
    )?;
    let mut config = Config::default();
    config.ffprobe_path = script.to_string_lossy().to_string();
    config.output_dir = Some(temp_dir.path().join("out"));
    let controller = Controller::with_config(config)?;

    let summary = tokio_test::block_on(async { controller.run_folder(&media_dir, temp_dir.path()).await })?;

    assert!(summary.submission_report.is_clean("talk1"));
    assert_eq!(summary.category_report.over_time_limit.get("talk3.mp4"), Some(&300));
    assert!(temp_dir.path().join("out").join("per-submission-report.json").exists());
    Ok(())
}
