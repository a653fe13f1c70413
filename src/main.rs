// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subshot::app_config::{self, Config};
use subshot::frame_extractor::DryRunExtractor;
use subshot::{AppError, Controller};

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
    /// Generate shell completions for subshot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subshot - screenshots at subtitle midpoints
///
/// Captures one frame per subtitle cue of a video, with the cue burned in.
#[derive(Parser, Debug)]
#[command(name = "subshot")]
#[command(version)]
#[command(about = "Extract screenshots from a video based on subtitle timings")]
#[command(long_about = "subshot reads the .srt (or, failing that, .ass) file next to a video and
captures one frame per cue with ffmpeg, burning the subtitle into the image.

EXAMPLES:
    subshot movie.mkv                      # Frames go to ./movie/movie-H-MM-SS-mmm.png
    subshot -n movie.mkv                   # Show the ffmpeg commands without running them
    subshot --ass-offset 0.2 movie.mkv     # Nudge ASS sample points by 0.2s
    subshot completions bash > subshot.bash

CONFIGURATION:
    Settings are read from subshot.json when it exists. Use --config to point
    at another file. Command line options override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video file to take screenshots from
    #[arg(value_name = "VIDEO_PATH")]
    video_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "subshot.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Seconds added to the midpoint of SRT cues
    #[arg(long, value_name = "SECS")]
    srt_offset: Option<f64>,

    /// Seconds added to the midpoint of ASS cues
    #[arg(long, value_name = "SECS")]
    ass_offset: Option<f64>,

    /// Treat unparseable timecodes as one second instead of failing
    #[arg(long)]
    legacy_timecodes: bool,

    /// ffmpeg executable to run
    #[arg(long, value_name = "PROGRAM")]
    ffmpeg: Option<String>,

    /// Log the ffmpeg commands without running them
    #[arg(short = 'n', long)]
    dry_run: bool,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subshot", &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli) {
        let code = match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                error!("{}", app_error);
                app_error.exit_code()
            }
            None => {
                error!("{:#}", e);
                1
            }
        };
        std::process::exit(code);
    }
}

fn run(options: CommandLineOptions) -> Result<()> {
    let video_path = options.video_path.clone()
        .ok_or_else(|| anyhow!("VIDEO_PATH is required when no subcommand is specified"))?;

    // Apply the command line level before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = if options.dry_run {
        let extractor = DryRunExtractor::new(config.ffmpeg_path.clone());
        Controller::with_extractor(config, Box::new(extractor))?
    } else {
        Controller::with_config(config)?
    };

    controller
        .show_progress(!options.dry_run)
        .run(&video_path)?;

    Ok(())
}

// @loads: Config file overridden by command line options
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(offset) = options.srt_offset {
        config.srt_offset_secs = offset;
    }
    if let Some(offset) = options.ass_offset {
        config.ass_offset_secs = offset;
    }
    if options.legacy_timecodes {
        config.legacy_timecode_fallback = true;
    }
    if let Some(ffmpeg) = &options.ffmpeg {
        config.ffmpeg_path = ffmpeg.clone();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
