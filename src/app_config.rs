use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::subtitle_processor::SubtitleFormat;
use crate::timecode::{FractionScale, TimecodeParser};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and applying configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Program used to capture frames
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Seconds added to the midpoint of SRT cues
    #[serde(default)]
    pub srt_offset_secs: f64,

    /// Seconds added to the midpoint of ASS cues
    #[serde(default = "default_ass_offset_secs")]
    pub ass_offset_secs: f64,

    /// Treat unparseable timecodes as one second instead of failing
    #[serde(default)]
    pub legacy_timecode_fallback: bool,

    /// Scaling of the fractional part of ASS timecodes
    #[serde(default)]
    pub ass_fraction_scale: FractionScale,

    /// Extension of the written images
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ass_offset_secs() -> f64 {
    SubtitleFormat::Ass.default_offset()
}

fn default_image_extension() -> String {
    "png".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("Config file not found at '{}', using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("ffmpeg_path must not be empty"));
        }

        for (name, value) in [("srt_offset_secs", self.srt_offset_secs), ("ass_offset_secs", self.ass_offset_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number, got {}", name, value));
            }
        }

        let ext = &self.image_extension;
        if ext.is_empty() || ext.contains(['/', '\\', '.']) {
            return Err(anyhow!("Invalid image_extension: {:?}", ext));
        }

        Ok(())
    }

    // @returns: Midpoint offset for a subtitle format
    pub fn offset_for(&self, format: SubtitleFormat) -> f64 {
        match format {
            SubtitleFormat::Srt => self.srt_offset_secs,
            SubtitleFormat::Ass => self.ass_offset_secs,
        }
    }

    // @returns: Timecode parser honoring the compatibility settings
    pub fn timecode_parser(&self) -> TimecodeParser {
        TimecodeParser::new(self.ass_fraction_scale, self.legacy_timecode_fallback)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            ffmpeg_path: default_ffmpeg_path(),
            srt_offset_secs: SubtitleFormat::Srt.default_offset(),
            ass_offset_secs: default_ass_offset_secs(),
            legacy_timecode_fallback: false,
            ass_fraction_scale: FractionScale::default(),
            image_extension: default_image_extension(),
            log_level: LogLevel::default(),
        }
    }
}
