/*!
 * Frame extraction through an external tool.
 *
 * The controller talks to a `FrameExtractor` so that scheduling can be
 * exercised without spawning processes. `FfmpegExtractor` is the real
 * implementation; `DryRunExtractor` only logs what would be run.
 */

use std::path::{Path, PathBuf};
use std::process::Command;
use log::{error, info};

use crate::errors::ExtractionError;

/// Everything needed to capture one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    /// Seek position in seconds
    pub seek_seconds: f64,
    /// Source video
    pub video_path: PathBuf,
    /// Subtitle file burned into the frame
    pub subtitle_path: PathBuf,
    /// Image to write
    pub output_path: PathBuf,
}

/// Captures a single frame with subtitles burned in
pub trait FrameExtractor {
    fn extract_frame(&self, request: &FrameRequest) -> Result<(), ExtractionError>;
}

/// Escape a path for use inside an ffmpeg filter argument
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
}

/// Build the ffmpeg argument list for a request
pub fn ffmpeg_args(request: &FrameRequest) -> Vec<String> {
    vec![
        "-ss".to_string(),
        format!("{:.3}", request.seek_seconds),
        "-copyts".to_string(),
        "-i".to_string(),
        request.video_path.to_string_lossy().to_string(),
        "-vf".to_string(),
        format!("subtitles='{}'", escape_filter_path(&request.subtitle_path)),
        "-vframes".to_string(),
        "1".to_string(),
        "-y".to_string(),
        request.output_path.to_string_lossy().to_string(),
    ]
}

// @struct: ffmpeg-backed extractor
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    // @field: Program to execute
    program: String,
}

impl FfmpegExtractor {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
        let noise_prefixes = [
            "ffmpeg version",
            "built with",
            "configuration:",
            "lib",
            "Input #",
            "Metadata:",
            "Duration:",
            "Chapter",
            "Stream #",
            "Output #",
            "Stream mapping:",
            "Press [q]",
            "frame=",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p)))
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FrameExtractor for FfmpegExtractor {
    fn extract_frame(&self, request: &FrameRequest) -> Result<(), ExtractionError> {
        let args = ffmpeg_args(request);
        info!("Running {} with arguments: {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ExtractionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_ffmpeg_stderr(&stderr);
            error!("Frame extraction failed: {}", filtered);
            return Err(ExtractionError::Failed {
                status: output.status.code(),
                stderr: filtered,
            });
        }

        Ok(())
    }
}

/// Extractor that logs commands without running them
#[derive(Debug, Clone, Default)]
pub struct DryRunExtractor {
    program: String,
}

impl DryRunExtractor {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }
}

impl FrameExtractor for DryRunExtractor {
    fn extract_frame(&self, request: &FrameRequest) -> Result<(), ExtractionError> {
        info!("[dry run] {} {}", self.program, ffmpeg_args(request).join(" "));
        Ok(())
    }
}
