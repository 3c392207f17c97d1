// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use subcheck::app_config::{self, Config};
use subcheck::app_controller::{self, Controller};
use subcheck::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subcheck - Conference video submission checker
///
/// Checks a folder of talk videos and subtitle files for format, duration
/// and subtitle compliance, and writes two JSON reports.
#[derive(Parser, Debug)]
#[command(name = "subcheck")]
#[command(version)]
#[command(about = "Check video submissions for format, duration and subtitle compliance")]
#[command(long_about = "subcheck checks a folder containing video and subtitle files (no sub-folders)
and writes per-category-report.json and per-submission-report.json to the current
directory.

Videos must be MP4 files, no longer than the time limit plus tolerance, and come
with an SRT subtitle file named after the video (talk.mp4 -> talk.srt, talk.en.srt).

EXAMPLES:
    subcheck videos/                     # 15 minute limit, 30 seconds tolerance
    subcheck -t 10 -d 15 videos/         # 10 minute limit, 15 seconds tolerance
    subcheck -o reports/ videos/         # Write reports to another directory
    subcheck completions bash > subcheck.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing the video and subtitle files
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Maximum duration of videos in minutes [default: 15]
    #[arg(short = 't', long = "timelimit")]
    time_limit: Option<f64>,

    /// Seconds a video may exceed the time limit [default: 30]
    #[arg(short = 'd', long)]
    tolerance: Option<f64>,

    /// Directory the reports are written to [default: current directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seconds to wait for ffprobe on a single file [default: 60]
    #[arg(long)]
    probe_timeout: Option<u64>,

    /// ffprobe binary to use [default: ffprobe]
    #[arg(long, env = "SUBCHECK_FFPROBE")]
    ffprobe: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    // The reports go next to where the tool was started, not into the media folder
    let working_dir = app_controller::current_working_dir()?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subcheck", &mut std::io::stdout());
        return Ok(());
    }

    let input_dir = cli.input_dir.clone().ok_or_else(|| {
        anyhow!(AppError::Usage(
            "Missing 1 argument - path to folder containing videos and subtitles".to_string()
        ))
    })?;

    if !input_dir.is_dir() {
        return Err(AppError::Usage(format!("Argument #1 should be path to a directory: {:?}", input_dir)).into());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    let summary = controller.run_folder(&input_dir, &working_dir).await?;

    println!(
        "Reports available at {}",
        summary
            .paths
            .category
            .parent()
            .unwrap_or(working_dir.as_path())
            .display()
    );
    println!(
        "{} video(s) checked, {} of {} submission(s) without issues",
        summary.videos, summary.clean_submissions, summary.submissions
    );

    Ok(())
}

// Load the configuration file if given, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    if let Some(time_limit) = cli.time_limit {
        config.time_limit_minutes = time_limit;
    }

    if let Some(tolerance) = cli.tolerance {
        config.tolerance_seconds = tolerance;
    }

    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = Some(output_dir.clone());
    }

    if let Some(probe_timeout) = cli.probe_timeout {
        config.probe_timeout_secs = probe_timeout;
    }

    if let Some(ffprobe) = &cli.ffprobe {
        config.ffprobe_path = ffprobe.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()?;
    Ok(config)
}
